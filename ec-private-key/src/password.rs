// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {
    std::{
        fmt::{Debug, Formatter},
        ops::Deref,
    },
    zeroize::Zeroizing,
};

/// A password protecting a PEM block.
///
/// The bytes are wiped when the value is dropped and are never printed.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Password(Zeroizing<Vec<u8>>);

impl Password {
    /// Whether the password is empty.
    ///
    /// Empty passwords are refused for encrypted blocks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

impl Deref for Password {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl From<&[u8]> for Password {
    fn from(v: &[u8]) -> Self {
        Self(Zeroizing::new(v.to_vec()))
    }
}

impl From<Vec<u8>> for Password {
    fn from(v: Vec<u8>) -> Self {
        Self(Zeroizing::new(v))
    }
}

impl From<&str> for Password {
    fn from(v: &str) -> Self {
        Self::from(v.as_bytes())
    }
}

impl From<String> for Password {
    fn from(v: String) -> Self {
        Self::from(v.into_bytes())
    }
}
