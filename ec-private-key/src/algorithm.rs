// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key algorithms and elliptic curves encountered in private key encodings.

use {
    crate::{rfc5280::AlgorithmIdentifier, PrivateKeyError as Error},
    bcder::{ConstOid, Oid},
    bytes::Bytes,
    std::{convert::TryFrom, fmt::Formatter},
};

/// RSA encryption.
///
/// 1.2.840.113549.1.1.1
pub(crate) const OID_RSA: ConstOid = Oid(&[42, 134, 72, 134, 247, 13, 1, 1, 1]);

/// Elliptic curve public key cryptography.
///
/// 1.2.840.10045.2.1
pub(crate) const OID_EC_PUBLIC_KEY: ConstOid = Oid(&[42, 134, 72, 206, 61, 2, 1]);

/// ED25519 key agreement.
///
/// 1.3.101.110
const OID_ED25519_KEY_AGREEMENT: ConstOid = Oid(&[43, 101, 110]);

/// Edwards curve digital signature algorithm.
///
/// 1.3.101.112
const OID_ED25519_SIGNATURE_ALGORITHM: ConstOid = Oid(&[43, 101, 112]);

/// Elliptic curve secp224r1 (NIST P-224).
///
/// 1.3.132.0.33
pub(crate) const OID_EC_SECP224R1: ConstOid = Oid(&[43, 129, 4, 0, 33]);

/// Elliptic curve secp256r1 (NIST P-256).
///
/// 1.2.840.10045.3.1.7
pub(crate) const OID_EC_SECP256R1: ConstOid = Oid(&[42, 134, 72, 206, 61, 3, 1, 7]);

/// Elliptic curve secp384r1 (NIST P-384).
///
/// 1.3.132.0.34
pub(crate) const OID_EC_SECP384R1: ConstOid = Oid(&[43, 129, 4, 0, 34]);

/// Elliptic curve secp521r1 (NIST P-521).
///
/// 1.3.132.0.35
pub(crate) const OID_EC_SECP521R1: ConstOid = Oid(&[43, 129, 4, 0, 35]);

/// SM2 elliptic curve.
///
/// 1.2.156.10197.1.301
///
/// OpenSSL uses this both as the named curve of an `id-ecPublicKey` key and,
/// in some versions, as the algorithm of the key itself.
pub(crate) const OID_SM2: ConstOid = Oid(&[42, 129, 28, 207, 85, 1, 130, 45]);

/// An elliptic curve used by standard ECDSA keys.
///
/// Instances can be converted to and from the named curve [Oid].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EcdsaCurve {
    /// NIST P-224.
    ///
    /// Corresponds to OID 1.3.132.0.33.
    Secp224r1,

    /// NIST P-256.
    ///
    /// Corresponds to OID 1.2.840.10045.3.1.7.
    Secp256r1,

    /// NIST P-384.
    ///
    /// Corresponds to OID 1.3.132.0.34.
    Secp384r1,

    /// NIST P-521.
    ///
    /// Corresponds to OID 1.3.132.0.35.
    Secp521r1,
}

impl EcdsaCurve {
    /// Obtain all variants of this type.
    pub fn all() -> &'static [Self] {
        &[
            Self::Secp224r1,
            Self::Secp256r1,
            Self::Secp384r1,
            Self::Secp521r1,
        ]
    }

    /// Obtain the size in bytes of a private scalar on this curve.
    pub fn scalar_size(&self) -> usize {
        match self {
            Self::Secp224r1 => 28,
            Self::Secp256r1 => 32,
            Self::Secp384r1 => 48,
            Self::Secp521r1 => 66,
        }
    }

    pub(crate) fn as_oid(&self) -> ConstOid {
        match self {
            Self::Secp224r1 => OID_EC_SECP224R1,
            Self::Secp256r1 => OID_EC_SECP256R1,
            Self::Secp384r1 => OID_EC_SECP384R1,
            Self::Secp521r1 => OID_EC_SECP521R1,
        }
    }
}

impl std::fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Secp224r1 => "secp224r1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
        })
    }
}

impl From<EcdsaCurve> for Oid {
    fn from(curve: EcdsaCurve) -> Self {
        Oid(Bytes::from_static(curve.as_oid().0))
    }
}

impl TryFrom<&Oid> for EcdsaCurve {
    type Error = Error;

    fn try_from(v: &Oid) -> Result<Self, Self::Error> {
        if v == &OID_EC_SECP224R1 {
            Ok(Self::Secp224r1)
        } else if v == &OID_EC_SECP256R1 {
            Ok(Self::Secp256r1)
        } else if v == &OID_EC_SECP384R1 {
            Ok(Self::Secp384r1)
        } else if v == &OID_EC_SECP521R1 {
            Ok(Self::Secp521r1)
        } else {
            Err(Error::UnknownEllipticCurve(format!("{}", v)))
        }
    }
}

/// A named curve as found in the parameters of an EC private key.
///
/// This is the union of the curves of both supported key families.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NamedCurve {
    Ecdsa(EcdsaCurve),
    Sm2,
}

impl TryFrom<&Oid> for NamedCurve {
    type Error = Error;

    fn try_from(v: &Oid) -> Result<Self, Self::Error> {
        if v == &OID_SM2 {
            Ok(Self::Sm2)
        } else {
            Ok(Self::Ecdsa(EcdsaCurve::try_from(v)?))
        }
    }
}

/// Cryptographic algorithm used by a private key.
///
/// Instances can be converted to/from the underlying ASN.1 type and
/// OIDs.
///
/// Only [KeyAlgorithm::Ecdsa] and [KeyAlgorithm::Sm2] keys can be represented
/// by [crate::PrivateKey]. The other variants exist so keys of those types
/// can be identified and rejected with a meaningful error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyAlgorithm {
    /// RSA
    ///
    /// Corresponds to OID 1.2.840.113549.1.1.1.
    Rsa,

    /// ECDSA on a standard curve.
    ///
    /// Corresponds to OID 1.2.840.10045.2.1 with the curve OID as parameter.
    Ecdsa(EcdsaCurve),

    /// SM2.
    ///
    /// Corresponds to OID 1.2.840.10045.2.1 with the SM2 curve as parameter,
    /// or the SM2 OID 1.2.156.10197.1.301 itself.
    Sm2,

    /// Corresponds to OID 1.3.101.110
    Ed25519,
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rsa => f.write_str("RSA"),
            Self::Ecdsa(curve) => write!(f, "ECDSA ({})", curve),
            Self::Sm2 => f.write_str("SM2"),
            Self::Ed25519 => f.write_str("ED25519"),
        }
    }
}

impl From<KeyAlgorithm> for Oid {
    fn from(alg: KeyAlgorithm) -> Self {
        Oid(Bytes::from_static(match alg {
            KeyAlgorithm::Rsa => OID_RSA.0,
            KeyAlgorithm::Ecdsa(_) | KeyAlgorithm::Sm2 => OID_EC_PUBLIC_KEY.0,
            KeyAlgorithm::Ed25519 => OID_ED25519_KEY_AGREEMENT.0,
        }))
    }
}

impl TryFrom<&AlgorithmIdentifier> for KeyAlgorithm {
    type Error = Error;

    /// Resolve the algorithm of a PKCS#8 `privateKeyAlgorithm`.
    ///
    /// For EC keys the curve comes from the parameters. An EC key without
    /// curve parameters resolves to [Error::UnknownEllipticCurve].
    fn try_from(v: &AlgorithmIdentifier) -> Result<Self, Self::Error> {
        let oid = &v.algorithm;

        if oid == &OID_RSA {
            Ok(Self::Rsa)
        } else if oid == &OID_EC_PUBLIC_KEY {
            let curve = v
                .parameters
                .as_ref()
                .ok_or_else(|| Error::UnknownEllipticCurve("<none>".to_string()))?
                .decode_oid()?;

            Ok(match NamedCurve::try_from(&curve)? {
                NamedCurve::Ecdsa(curve) => Self::Ecdsa(curve),
                NamedCurve::Sm2 => Self::Sm2,
            })
        } else if oid == &OID_SM2 {
            Ok(Self::Sm2)
        // ED25519 appears to use the signature algorithm OID for private key
        // identification, so we need to accept both.
        } else if oid == &OID_ED25519_KEY_AGREEMENT || oid == &OID_ED25519_SIGNATURE_ALGORITHM {
            Ok(Self::Ed25519)
        } else {
            Err(Error::UnknownKeyAlgorithm(format!("{}", oid)))
        }
    }
}

impl From<KeyAlgorithm> for AlgorithmIdentifier {
    fn from(alg: KeyAlgorithm) -> Self {
        let parameters = match alg {
            KeyAlgorithm::Ecdsa(curve) => Some(Oid::from(curve)),
            KeyAlgorithm::Sm2 => Some(Oid(Bytes::from_static(OID_SM2.0))),
            KeyAlgorithm::Rsa | KeyAlgorithm::Ed25519 => None,
        };

        Self {
            algorithm: alg.into(),
            parameters: parameters.map(crate::rfc5280::AlgorithmParameter::from_oid),
        }
    }
}
