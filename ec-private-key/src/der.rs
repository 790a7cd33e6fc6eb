// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of DER private keys in the formats found in the wild.
//!
//! DER carries no indication of which structure it holds, so the formats
//! are attempted in a fixed order and the first one to parse wins:
//!
//! 1. The traditional OpenSSL EC layout: an RFC 5915 `ECPrivateKey`
//!    naming a standard curve and carrying its public key.
//! 2. PKCS#8 (RFC 5958 `OneAsymmetricKey`). A key that is well-formed
//!    PKCS#8 but holds anything other than an ECDSA key on a supported
//!    curve is rejected outright.
//! 3. A general SEC1 `ECPrivateKey`, which is the only form that yields
//!    SM2 keys.

use {
    crate::{
        algorithm::{EcdsaCurve, KeyAlgorithm, NamedCurve},
        key::{EcdsaPrivateKey, PrivateKey},
        rfc5480::EcParameters,
        rfc5915::EcPrivateKey,
        rfc5958::OneAsymmetricKey,
        PrivateKeyError as Error,
    },
    log::{debug, trace},
    std::{convert::TryFrom, fmt::Formatter},
};

/// A DER private key format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DerFormat {
    /// Traditional single-algorithm EC layout, as written by `openssl ec`.
    Pkcs1,

    /// PKCS#8 `PrivateKeyInfo` / `OneAsymmetricKey`.
    Pkcs8,

    /// SEC1 `ECPrivateKey`.
    Sec1,
}

impl std::fmt::Display for DerFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pkcs1 => "PKCS#1",
            Self::Pkcs8 => "PKCS#8",
            Self::Sec1 => "SEC1",
        })
    }
}

/// Outcome of decoding with a single format.
enum Attempt {
    /// The data is in this format and holds a supported key.
    Parsed(PrivateKey),

    /// The data is in this format but the key can't be accepted. Stops the search.
    Rejected(Error),

    /// The data isn't in this format.
    Unrecognized(Error),
}

impl From<Result<PrivateKey, Error>> for Attempt {
    fn from(res: Result<PrivateKey, Error>) -> Self {
        match res {
            Ok(key) => Self::Parsed(key),
            Err(e) => Self::Unrecognized(e),
        }
    }
}

const ATTEMPTS: [(DerFormat, fn(&[u8]) -> Attempt); 3] = [
    (DerFormat::Pkcs1, parse_traditional),
    (DerFormat::Pkcs8, parse_pkcs8),
    (DerFormat::Sec1, parse_sec1),
];

fn named_curve(key: &EcPrivateKey) -> Result<&bcder::Oid, Error> {
    key.parameters
        .as_ref()
        .and_then(EcParameters::named_curve)
        .ok_or_else(|| Error::UnknownEllipticCurve("<none>".to_string()))
}

fn scalar(key: &EcPrivateKey) -> Result<&[u8], Error> {
    key.private_key_data().ok_or(Error::UnrecognizedDerFormat)
}

fn ensure_public_key_matches(key: &PrivateKey, ec: &EcPrivateKey) -> Result<(), Error> {
    match ec.public_key_data() {
        Some(data) if !key.matches_public_key(data) => Err(Error::PublicKeyMismatch),
        _ => Ok(()),
    }
}

fn traditional_key(der: &[u8]) -> Result<PrivateKey, Error> {
    let ec = EcPrivateKey::from_der(der)?;
    let curve = EcdsaCurve::try_from(named_curve(&ec)?)?;

    if ec.public_key.is_none() {
        return Err(Error::UnrecognizedDerFormat);
    }

    let key = PrivateKey::Ecdsa(EcdsaPrivateKey::from_scalar(curve, scalar(&ec)?)?);
    ensure_public_key_matches(&key, &ec)?;

    Ok(key)
}

fn parse_traditional(der: &[u8]) -> Attempt {
    traditional_key(der).into()
}

fn wrapped_ecdsa_key(wrapped: &OneAsymmetricKey, curve: EcdsaCurve) -> Result<PrivateKey, Error> {
    let ec = EcPrivateKey::try_from(&wrapped.private_key)?;

    // The inner key normally omits the curve. If it is there, it must agree.
    if let Some(oid) = ec.parameters.as_ref().and_then(EcParameters::named_curve) {
        if EcdsaCurve::try_from(oid)? != curve {
            return Err(Error::UnknownEllipticCurve(format!("{}", oid)));
        }
    }

    let key = PrivateKey::Ecdsa(EcdsaPrivateKey::from_scalar(curve, scalar(&ec)?)?);
    ensure_public_key_matches(&key, &ec)?;

    Ok(key)
}

fn parse_pkcs8(der: &[u8]) -> Attempt {
    let wrapped = match OneAsymmetricKey::from_der(der) {
        Ok(wrapped) => wrapped,
        Err(e) => return Attempt::Unrecognized(e.into()),
    };

    let algorithm = match KeyAlgorithm::try_from(&wrapped.private_key_algorithm) {
        Ok(algorithm) => algorithm,
        Err(e @ (Error::UnknownKeyAlgorithm(_) | Error::UnknownEllipticCurve(_))) => {
            return Attempt::Rejected(Error::UnsupportedWrappedAlgorithm(e.to_string()));
        }
        Err(e) => return Attempt::Unrecognized(e),
    };

    match algorithm {
        KeyAlgorithm::Ecdsa(curve) => wrapped_ecdsa_key(&wrapped, curve).into(),
        algorithm => Attempt::Rejected(Error::UnsupportedWrappedAlgorithm(algorithm.to_string())),
    }
}

fn sec1_key(der: &[u8]) -> Result<PrivateKey, Error> {
    let ec = EcPrivateKey::from_der(der)?;
    let curve = NamedCurve::try_from(named_curve(&ec)?)?;

    // Any embedded public key is ignored and derived from the scalar instead.
    PrivateKey::from_scalar(curve, scalar(&ec)?)
}

fn parse_sec1(der: &[u8]) -> Attempt {
    sec1_key(der).into()
}

/// Parse a DER encoded private key, reporting the format it was found in.
pub fn parse_private_key_der_with_format(der: &[u8]) -> Result<(PrivateKey, DerFormat), Error> {
    for &(format, attempt) in ATTEMPTS.iter() {
        match attempt(der) {
            Attempt::Parsed(key) => {
                debug!("parsed {} private key from {} DER", key.key_algorithm(), format);
                return Ok((key, format));
            }
            Attempt::Rejected(e) => {
                debug!("rejected {} DER: {}", format, e);
                return Err(e);
            }
            Attempt::Unrecognized(e) => {
                trace!("DER is not a {} private key: {}", format, e);
            }
        }
    }

    Err(Error::UnrecognizedDerFormat)
}

/// Parse a DER encoded private key.
///
/// The traditional OpenSSL EC, PKCS#8 and SEC1 formats are tried in that
/// order. See the module documentation for details.
///
/// PKCS#8 data holding a key of an unsupported algorithm yields
/// [Error::UnsupportedWrappedAlgorithm]. Data matching none of the formats
/// yields [Error::UnrecognizedDerFormat].
pub fn parse_private_key_der(der: &[u8]) -> Result<PrivateKey, Error> {
    Ok(parse_private_key_der_with_format(der)?.0)
}
