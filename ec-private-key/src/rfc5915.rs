// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASN.1 primitives defined by RFC 5915.

use {
    crate::rfc5480::EcParameters,
    bcder::{
        decode::{Constructed, DecodeError, Source},
        encode::{self, PrimitiveContent, Values},
        BitString, Integer, Mode, OctetString, Tag,
    },
    std::{convert::Infallible, io::Write},
};

/// Elliptic curve private key.
///
/// ```ASN.1
/// ECPrivateKey ::= SEQUENCE {
///   version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
///   privateKey     OCTET STRING,
///   parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
///   publicKey  [1] BIT STRING OPTIONAL
/// }
/// ```
///
/// `parameters` and `publicKey` are EXPLICIT tagged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcPrivateKey {
    pub private_key: OctetString,
    pub parameters: Option<EcParameters>,
    pub public_key: Option<BitString>,
}

impl EcPrivateKey {
    /// The only defined `version` value.
    pub const VERSION: i8 = 1;

    pub fn take_from<S: Source>(cons: &mut Constructed<S>) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let version = cons.take_primitive_if(Tag::INTEGER, Integer::i8_from_primitive)?;
            if version != Self::VERSION {
                return Err(cons.content_err("unexpected ECPrivateKey version"));
            }

            let private_key = OctetString::take_from(cons)?;
            let parameters =
                cons.take_opt_constructed_if(Tag::CTX_0, |cons| EcParameters::take_from(cons))?;
            let public_key =
                cons.take_opt_constructed_if(Tag::CTX_1, |cons| BitString::take_from(cons))?;

            Ok(Self {
                private_key,
                parameters,
                public_key,
            })
        })
    }

    /// Decode an instance from DER data.
    pub fn from_der(data: &[u8]) -> Result<Self, DecodeError<Infallible>> {
        Constructed::decode(data, Mode::Der, |cons| Self::take_from(cons))
    }

    pub fn encode_ref(&self) -> impl Values + '_ {
        encode::sequence((
            Self::VERSION.encode(),
            self.private_key.encode_ref(),
            self.parameters
                .as_ref()
                .map(|parameters| encode::sequence_as(Tag::CTX_0, parameters.encode_ref())),
            self.public_key
                .as_ref()
                .map(|public_key| encode::sequence_as(Tag::CTX_1, public_key.encode_ref())),
        ))
    }

    /// Encode this instance to DER.
    pub fn encode_der(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut der = Vec::new();
        self.encode_der_to(&mut der)?;

        Ok(der)
    }

    pub fn encode_der_to(&self, fh: &mut impl Write) -> Result<(), std::io::Error> {
        self.encode_ref().write_encoded(Mode::Der, fh)
    }

    /// Obtain the raw private scalar bytes.
    ///
    /// Returns `None` if the octet string was constructed (BER only).
    pub fn private_key_data(&self) -> Option<&[u8]> {
        self.private_key.as_slice()
    }

    /// Obtain the raw public key point bytes, if present and octet aligned.
    pub fn public_key_data(&self) -> Option<&[u8]> {
        self.public_key
            .as_ref()
            .and_then(|public_key| public_key.octet_slice())
    }
}
