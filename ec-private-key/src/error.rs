// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {
    crate::{legacy::LegacyPemError, KeyAlgorithm},
    std::convert::Infallible,
    thiserror::Error,
};

/// Unified error type for private key handling.
#[derive(Debug, Error)]
pub enum PrivateKeyError {
    #[error("invalid key: no private key was given")]
    NilKey,

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(KeyAlgorithm),

    #[error("failed decoding PEM: {} (input: {})", .0, hex::encode(.1))]
    MalformedPem(pem::PemError, Vec<u8>),

    #[error("failed encoding PEM: {0}")]
    PemEncode(pem::PemError),

    #[error("encrypted key: a password is required")]
    MissingPassword,

    #[error("failed PEM decryption: {0}")]
    Decryption(#[from] LegacyPemError),

    #[error("found unknown private key type in PKCS#8 wrapping: {0}")]
    UnsupportedWrappedAlgorithm(String),

    #[error("invalid key type; DER must contain a supported elliptic-curve private key")]
    UnrecognizedDerFormat,

    #[error("unknown elliptic curve: {0}")]
    UnknownEllipticCurve(String),

    #[error("unknown key algorithm: {0}")]
    UnknownKeyAlgorithm(String),

    #[error("public key does not belong to the private key")]
    PublicKeyMismatch,

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(elliptic_curve::Error),

    #[error("ASN.1 decode error: {0}")]
    Asn1Decode(#[from] bcder::decode::DecodeError<Infallible>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed generating random data")]
    Random,
}
