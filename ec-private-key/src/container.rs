// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PEM armored private keys.

use {
    crate::{
        der::parse_private_key_der,
        encode::{encode_private_key_der, encode_private_key_pkcs8_der},
        key::PrivateKey,
        legacy::{decrypt_pem_block, encrypt_pem_block, is_encrypted_pem_block, PemCipher},
        password::Password,
        PrivateKeyError as Error,
    },
    log::debug,
    pem::{EncodeConfig, LineEnding, Pem},
    zeroize::Zeroizing,
};

/// PEM label of SEC1 EC private keys.
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

/// PEM label of PKCS#8 private keys.
pub const PKCS8_PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

fn encode_pem(pem: &Pem) -> String {
    pem::encode_config(pem, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

/// Decode a PEM armored private key.
///
/// The label of the PEM block isn't consulted: its content is parsed with
/// [crate::parse_private_key_der] whatever it claims to be.
///
/// Blocks protected with legacy PEM encryption are decrypted with `password`,
/// which must then be non-empty. `password` is ignored for unencrypted
/// blocks.
pub fn decode_pem_private_key(raw: &[u8], password: &[u8]) -> Result<PrivateKey, Error> {
    let pem = pem::parse(raw).map_err(|e| Error::MalformedPem(e, raw.to_vec()))?;

    let der = if is_encrypted_pem_block(&pem) {
        decrypt_pem_block(&pem, &Password::from(password))?
    } else {
        debug!("reading unencrypted {} PEM block", pem.tag());
        Zeroizing::new(pem.into_contents())
    };

    parse_private_key_der(&der)
}

/// Encode a private key as an `EC PRIVATE KEY` PEM block.
pub fn encode_private_key_pem(key: &PrivateKey) -> Result<String, Error> {
    let der = Zeroizing::new(encode_private_key_der(Some(key))?);

    Ok(encode_pem(&Pem::new(EC_PRIVATE_KEY_LABEL, der.to_vec())))
}

/// Encode a private key as a PKCS#8 `PRIVATE KEY` PEM block.
pub fn encode_private_key_pkcs8_pem(key: &PrivateKey) -> Result<String, Error> {
    let der = Zeroizing::new(encode_private_key_pkcs8_der(key)?);

    Ok(encode_pem(&Pem::new(PKCS8_PRIVATE_KEY_LABEL, der.to_vec())))
}

/// Encode a private key as an `EC PRIVATE KEY` PEM block with legacy PEM encryption.
pub fn encode_encrypted_private_key_pem(
    key: &PrivateKey,
    password: &[u8],
    cipher: PemCipher,
) -> Result<String, Error> {
    let der = Zeroizing::new(encode_private_key_der(Some(key))?);
    let pem = encrypt_pem_block(EC_PRIVATE_KEY_LABEL, &der, &Password::from(password), cipher)?;

    Ok(encode_pem(&pem))
}
