// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASN.1 primitives defined by RFC 5480.

use bcder::{
    decode::{Constructed, DecodeError, Source},
    encode::{PrimitiveContent, Values},
    Oid, Tag,
};

/// Elliptic curve parameters.
///
/// ```ASN.1
/// ECParameters ::= CHOICE {
///   namedCurve         OBJECT IDENTIFIER
///   -- implicitCurve   NULL
///   -- specifiedCurve  SpecifiedECDomain
///  }
/// ```
///
/// Explicit curve domains (`specifiedCurve`) are refused by the decoder.
/// Keys in the wild practically always name their curve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EcParameters {
    NamedCurve(Oid),
    ImplicitCurve,
}

impl EcParameters {
    pub fn take_from<S: Source>(cons: &mut Constructed<S>) -> Result<Self, DecodeError<S::Error>> {
        if let Some(oid) = Oid::take_opt_from(cons)? {
            Ok(Self::NamedCurve(oid))
        } else {
            let null_value = cons.take_opt_primitive_if(Tag::NULL, |cons| {
                cons.take_all()?;
                Ok(())
            })?;

            if null_value.is_some() {
                Ok(Self::ImplicitCurve)
            } else {
                Err(cons.content_err("parsing of SpecifiedECDomain not implemented"))
            }
        }
    }

    /// Obtain the OID of the named curve, if this names one.
    pub fn named_curve(&self) -> Option<&Oid> {
        match self {
            Self::NamedCurve(oid) => Some(oid),
            Self::ImplicitCurve => None,
        }
    }

    pub fn encode_ref(&self) -> impl Values + '_ {
        match self {
            Self::NamedCurve(oid) => (Some(oid.encode_ref()), None),
            Self::ImplicitCurve => (None, Some(().encode_as(Tag::NULL))),
        }
    }
}
