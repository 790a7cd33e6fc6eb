// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elliptic curve private key encoding and decoding.
//!
//! This crate converts elliptic curve private keys between an in-memory
//! [PrivateKey] and their PEM and DER encodings. Two families of keys are
//! supported: ECDSA on the NIST P-224, P-256, P-384 and P-521 curves, and
//! SM2.
//!
//! Decoding accepts what common tooling emits:
//!
//! * PEM armor with any label, optionally protected with legacy (OpenSSL
//!   "traditional") PEM encryption. See [decode_pem_private_key].
//! * DER in the traditional OpenSSL EC layout, PKCS#8, or SEC1. The format
//!   is detected. See [parse_private_key_der].
//!
//! Encoding produces SEC1 `ECPrivateKey` DER byte-identical to what OpenSSL
//! writes ([encode_private_key_der]), or PKCS#8 DER
//! ([encode_private_key_pkcs8_der]), optionally PEM armored and encrypted.
//!
//! Low-level ASN.1 primitives are defined in modules having the name of the
//! RFC in which they are defined.

pub mod algorithm;
pub use algorithm::{EcdsaCurve, KeyAlgorithm};
mod container;
pub use container::{
    decode_pem_private_key, encode_encrypted_private_key_pem, encode_private_key_pem,
    encode_private_key_pkcs8_pem, EC_PRIVATE_KEY_LABEL, PKCS8_PRIVATE_KEY_LABEL,
};
mod der;
pub use der::{parse_private_key_der, parse_private_key_der_with_format, DerFormat};
mod encode;
pub use encode::{
    encode_private_key_der, encode_private_key_pkcs8_der, encode_raw_private_key_der,
};
mod error;
pub use error::PrivateKeyError;
mod key;
pub use key::{EcdsaPrivateKey, PrivateKey};
pub mod legacy;
pub use legacy::{LegacyPemError, PemCipher};
mod password;
pub use password::Password;
pub mod rfc5280;
pub mod rfc5480;
pub mod rfc5915;
pub mod rfc5958;

#[cfg(test)]
mod testutil;
