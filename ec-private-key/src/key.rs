// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory private keys.

use {
    crate::{
        algorithm::{EcdsaCurve, KeyAlgorithm, NamedCurve},
        container, der, encode,
        legacy::PemCipher,
        PrivateKeyError as Error,
    },
    bytes::Bytes,
    elliptic_curve::{sec1::ToEncodedPoint, Curve, SecretKey},
    zeroize::{Zeroize, Zeroizing},
};

fn secret_key_from_slice<C: Curve>(data: &[u8]) -> Result<SecretKey<C>, Error> {
    SecretKey::<C>::from_slice(data).map_err(Error::InvalidPrivateKey)
}

fn scalar_bytes<C: Curve>(key: &SecretKey<C>) -> Zeroizing<Vec<u8>> {
    let mut bytes = key.to_bytes();
    let data = Zeroizing::new(bytes.to_vec());
    bytes.as_mut_slice().zeroize();

    data
}

/// An ECDSA private key on one of the supported standard curves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EcdsaPrivateKey {
    /// Key on NIST P-224.
    Secp224r1(p224::SecretKey),

    /// Key on NIST P-256.
    Secp256r1(p256::SecretKey),

    /// Key on NIST P-384.
    Secp384r1(p384::SecretKey),

    /// Key on NIST P-521.
    Secp521r1(p521::SecretKey),
}

impl EcdsaPrivateKey {
    /// Construct an instance from a raw big-endian private scalar.
    ///
    /// The scalar is validated to be in range for the curve.
    pub fn from_scalar(curve: EcdsaCurve, data: &[u8]) -> Result<Self, Error> {
        Ok(match curve {
            EcdsaCurve::Secp224r1 => Self::Secp224r1(secret_key_from_slice(data)?),
            EcdsaCurve::Secp256r1 => Self::Secp256r1(secret_key_from_slice(data)?),
            EcdsaCurve::Secp384r1 => Self::Secp384r1(secret_key_from_slice(data)?),
            EcdsaCurve::Secp521r1 => Self::Secp521r1(secret_key_from_slice(data)?),
        })
    }

    /// The curve this key is on.
    pub fn curve(&self) -> EcdsaCurve {
        match self {
            Self::Secp224r1(_) => EcdsaCurve::Secp224r1,
            Self::Secp256r1(_) => EcdsaCurve::Secp256r1,
            Self::Secp384r1(_) => EcdsaCurve::Secp384r1,
            Self::Secp521r1(_) => EcdsaCurve::Secp521r1,
        }
    }

    /// Obtain the fixed-width big-endian private scalar.
    pub fn private_key_data(&self) -> Zeroizing<Vec<u8>> {
        match self {
            Self::Secp224r1(key) => scalar_bytes(key),
            Self::Secp256r1(key) => scalar_bytes(key),
            Self::Secp384r1(key) => scalar_bytes(key),
            Self::Secp521r1(key) => scalar_bytes(key),
        }
    }

    /// Obtain the public key as an uncompressed SEC1 point.
    pub fn public_key_data(&self) -> Bytes {
        match self {
            Self::Secp224r1(key) => {
                Bytes::copy_from_slice(key.public_key().to_encoded_point(false).as_bytes())
            }
            Self::Secp256r1(key) => {
                Bytes::copy_from_slice(key.public_key().to_encoded_point(false).as_bytes())
            }
            Self::Secp384r1(key) => {
                Bytes::copy_from_slice(key.public_key().to_encoded_point(false).as_bytes())
            }
            Self::Secp521r1(key) => {
                Bytes::copy_from_slice(key.public_key().to_encoded_point(false).as_bytes())
            }
        }
    }

    fn matches_public_key(&self, data: &[u8]) -> bool {
        match self {
            Self::Secp224r1(key) => p224::PublicKey::from_sec1_bytes(data)
                .map(|public_key| public_key == key.public_key())
                .unwrap_or(false),
            Self::Secp256r1(key) => p256::PublicKey::from_sec1_bytes(data)
                .map(|public_key| public_key == key.public_key())
                .unwrap_or(false),
            Self::Secp384r1(key) => p384::PublicKey::from_sec1_bytes(data)
                .map(|public_key| public_key == key.public_key())
                .unwrap_or(false),
            Self::Secp521r1(key) => p521::PublicKey::from_sec1_bytes(data)
                .map(|public_key| public_key == key.public_key())
                .unwrap_or(false),
        }
    }
}

impl From<p224::SecretKey> for EcdsaPrivateKey {
    fn from(key: p224::SecretKey) -> Self {
        Self::Secp224r1(key)
    }
}

impl From<p256::SecretKey> for EcdsaPrivateKey {
    fn from(key: p256::SecretKey) -> Self {
        Self::Secp256r1(key)
    }
}

impl From<p384::SecretKey> for EcdsaPrivateKey {
    fn from(key: p384::SecretKey) -> Self {
        Self::Secp384r1(key)
    }
}

impl From<p521::SecretKey> for EcdsaPrivateKey {
    fn from(key: p521::SecretKey) -> Self {
        Self::Secp521r1(key)
    }
}

/// An elliptic curve private key of one of the supported algorithm families.
///
/// This is the value produced by every decoding routine in this crate and
/// consumed by every encoding routine. There is no variant for unknown
/// key types: keys of other algorithms are rejected while decoding and
/// cannot be constructed.
///
/// Equality compares key material (in constant time) within a family and
/// curve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrivateKey {
    /// ECDSA key on a standard curve.
    Ecdsa(EcdsaPrivateKey),

    /// SM2 key.
    Sm2(sm2::SecretKey),
}

impl PrivateKey {
    /// Construct an instance from a raw scalar and the curve it belongs to.
    pub(crate) fn from_scalar(curve: NamedCurve, data: &[u8]) -> Result<Self, Error> {
        match curve {
            NamedCurve::Ecdsa(curve) => Ok(Self::Ecdsa(EcdsaPrivateKey::from_scalar(curve, data)?)),
            NamedCurve::Sm2 => Ok(Self::Sm2(secret_key_from_slice(data)?)),
        }
    }

    /// Construct an instance from a raw private scalar tagged with its algorithm.
    ///
    /// Only ECDSA and SM2 algorithms are accepted. Anything else yields
    /// [Error::UnsupportedKeyType].
    pub fn from_raw(algorithm: KeyAlgorithm, data: &[u8]) -> Result<Self, Error> {
        match algorithm {
            KeyAlgorithm::Ecdsa(curve) => Self::from_scalar(NamedCurve::Ecdsa(curve), data),
            KeyAlgorithm::Sm2 => Self::from_scalar(NamedCurve::Sm2, data),
            KeyAlgorithm::Rsa | KeyAlgorithm::Ed25519 => Err(Error::UnsupportedKeyType(algorithm)),
        }
    }

    /// Parse a DER encoded private key in any supported format.
    ///
    /// See [crate::parse_private_key_der].
    pub fn from_der(data: impl AsRef<[u8]>) -> Result<Self, Error> {
        der::parse_private_key_der(data.as_ref())
    }

    /// Parse a PEM encoded private key, decrypting it if needed.
    ///
    /// `password` is only consulted for encrypted PEM blocks and may be empty
    /// otherwise. See [crate::decode_pem_private_key].
    pub fn from_pem(data: impl AsRef<[u8]>, password: &[u8]) -> Result<Self, Error> {
        container::decode_pem_private_key(data.as_ref(), password)
    }

    /// Obtain the algorithm of this key.
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ecdsa(key) => KeyAlgorithm::Ecdsa(key.curve()),
            Self::Sm2(_) => KeyAlgorithm::Sm2,
        }
    }

    /// Obtain the fixed-width big-endian private scalar.
    pub fn private_key_data(&self) -> Zeroizing<Vec<u8>> {
        match self {
            Self::Ecdsa(key) => key.private_key_data(),
            Self::Sm2(key) => scalar_bytes(key),
        }
    }

    /// Obtain the public key as an uncompressed SEC1 point.
    pub fn public_key_data(&self) -> Bytes {
        match self {
            Self::Ecdsa(key) => key.public_key_data(),
            Self::Sm2(key) => {
                Bytes::copy_from_slice(key.public_key().to_encoded_point(false).as_bytes())
            }
        }
    }

    /// Whether a SEC1 encoded public point belongs to this private key.
    ///
    /// Compressed and uncompressed points are both accepted.
    pub fn matches_public_key(&self, data: &[u8]) -> bool {
        match self {
            Self::Ecdsa(key) => key.matches_public_key(data),
            Self::Sm2(key) => sm2::PublicKey::from_sec1_bytes(data)
                .map(|public_key| public_key == key.public_key())
                .unwrap_or(false),
        }
    }

    /// Encode this key to SEC1 `ECPrivateKey` DER.
    pub fn to_der(&self) -> Result<Vec<u8>, Error> {
        encode::encode_private_key_der(Some(self))
    }

    /// Encode this key to PKCS#8 DER.
    ///
    /// SM2 keys are refused. See [crate::encode_private_key_pkcs8_der].
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>, Error> {
        encode::encode_private_key_pkcs8_der(self)
    }

    /// Encode this key to PEM armored SEC1 (`EC PRIVATE KEY`).
    pub fn to_pem(&self) -> Result<String, Error> {
        container::encode_private_key_pem(self)
    }

    /// Encode this key to PEM armored PKCS#8 (`PRIVATE KEY`).
    pub fn to_pkcs8_pem(&self) -> Result<String, Error> {
        container::encode_private_key_pkcs8_pem(self)
    }

    /// Encode this key to an `EC PRIVATE KEY` PEM block protected with legacy PEM encryption.
    pub fn to_encrypted_pem(&self, password: &[u8], cipher: PemCipher) -> Result<String, Error> {
        container::encode_encrypted_private_key_pem(self, password, cipher)
    }
}

impl From<EcdsaPrivateKey> for PrivateKey {
    fn from(key: EcdsaPrivateKey) -> Self {
        Self::Ecdsa(key)
    }
}

impl From<sm2::SecretKey> for PrivateKey {
    fn from(key: sm2::SecretKey) -> Self {
        Self::Sm2(key)
    }
}
