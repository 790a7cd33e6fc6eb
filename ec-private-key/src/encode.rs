// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DER encoding of private keys.

use {
    crate::{
        algorithm::{KeyAlgorithm, OID_SM2},
        key::{EcdsaPrivateKey, PrivateKey},
        rfc5480::EcParameters,
        rfc5915::EcPrivateKey,
        rfc5958::{OneAsymmetricKey, Version},
        PrivateKeyError as Error,
    },
    bcder::{BitString, OctetString, Oid},
    bytes::Bytes,
    elliptic_curve::sec1::ToEncodedPoint,
    zeroize::Zeroizing,
};

fn sec1_private_key(curve: Oid, scalar: &[u8], public_key: Bytes) -> EcPrivateKey {
    EcPrivateKey {
        private_key: OctetString::new(Bytes::copy_from_slice(scalar)),
        parameters: Some(EcParameters::NamedCurve(curve)),
        public_key: Some(BitString::new(0, public_key)),
    }
}

/// Zero key material held in an octet string once it has been encoded.
///
/// The buffer must be uniquely owned so it is reclaimed rather than copied.
fn wipe(data: OctetString) {
    drop(Zeroizing::new(Vec::<u8>::from(data.into_bytes())));
}

/// Encode a SEC1 key, wiping its copy of the scalar.
fn encode_sec1(key: EcPrivateKey) -> Result<Vec<u8>, Error> {
    let der = key.encode_der();
    wipe(key.private_key);

    Ok(der?)
}

/// Encode a standard curve key to SEC1 DER.
fn encode_ecdsa_der(key: &EcdsaPrivateKey) -> Result<Vec<u8>, Error> {
    let scalar = key.private_key_data();

    encode_sec1(sec1_private_key(key.curve().into(), &scalar, key.public_key_data()))
}

/// Encode an SM2 key to SEC1 DER.
fn encode_sm2_der(key: &sm2::SecretKey) -> Result<Vec<u8>, Error> {
    let scalar = Zeroizing::new(key.to_bytes().to_vec());
    let public_key = Bytes::copy_from_slice(key.public_key().to_encoded_point(false).as_bytes());

    encode_sec1(sec1_private_key(Oid(Bytes::from_static(OID_SM2.0)), &scalar, public_key))
}

/// Encode a private key to DER.
///
/// The output is an RFC 5915 `ECPrivateKey` (SEC1) with the named curve and
/// uncompressed public key present, which is what `openssl ec` emits.
///
/// `None` is refused with [Error::NilKey].
pub fn encode_private_key_der(key: Option<&PrivateKey>) -> Result<Vec<u8>, Error> {
    match key.ok_or(Error::NilKey)? {
        PrivateKey::Sm2(key) => encode_sm2_der(key),
        PrivateKey::Ecdsa(key) => encode_ecdsa_der(key),
    }
}

/// Encode a raw private scalar tagged with its algorithm to DER.
///
/// Algorithms outside the ECDSA and SM2 families are refused with
/// [Error::UnsupportedKeyType].
pub fn encode_raw_private_key_der(algorithm: KeyAlgorithm, scalar: &[u8]) -> Result<Vec<u8>, Error> {
    let key = PrivateKey::from_raw(algorithm, scalar)?;

    encode_private_key_der(Some(&key))
}

/// Encode a private key to PKCS#8 DER.
///
/// The SEC1 form is wrapped in a version 1 `OneAsymmetricKey` whose algorithm
/// is `id-ecPublicKey` with the named curve as parameter. The curve is not
/// repeated in the inner key.
///
/// Only ECDSA keys can be wrapped: SM2 keys are refused with
/// [Error::UnsupportedKeyType], as PKCS#8 SM2 keys are not accepted by
/// [crate::parse_private_key_der] either.
pub fn encode_private_key_pkcs8_der(key: &PrivateKey) -> Result<Vec<u8>, Error> {
    let key = match key {
        PrivateKey::Ecdsa(key) => key,
        PrivateKey::Sm2(_) => return Err(Error::UnsupportedKeyType(KeyAlgorithm::Sm2)),
    };

    let scalar = key.private_key_data();

    let mut inner = sec1_private_key(key.curve().into(), &scalar, key.public_key_data());
    inner.parameters = None;
    let inner = Zeroizing::new(encode_sec1(inner)?);

    let wrapped = OneAsymmetricKey {
        version: Version::V1,
        private_key_algorithm: KeyAlgorithm::Ecdsa(key.curve()).into(),
        private_key: OctetString::new(Bytes::copy_from_slice(&inner)),
        attributes: None,
        public_key: None,
    };

    let der = wrapped.encode_der();
    wipe(wrapped.private_key);

    Ok(der?)
}
