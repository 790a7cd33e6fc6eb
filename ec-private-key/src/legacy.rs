// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Legacy PEM encryption.
//!
//! This is the RFC 1421 style encryption OpenSSL applies to "traditional"
//! private keys, e.g. via `openssl ec -aes256`. The block carries a pair of
//! headers:
//!
//! ```text
//! Proc-Type: 4,ENCRYPTED
//! DEK-Info: AES-256-CBC,<IV as hex>
//! ```
//!
//! The cipher key is derived from the password with OpenSSL's
//! `EVP_BytesToKey()` using MD5, a single iteration, and the first 8 bytes
//! of the IV as salt. The payload is encrypted in CBC mode with PKCS#7
//! padding.
//!
//! None of this is strong cryptography. It exists so keys produced by
//! common tooling can be read (and written).

use {
    crate::{password::Password, PrivateKeyError},
    cbc::cipher::{
        block_padding::Pkcs7, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
    },
    log::debug,
    md5::{Digest, Md5},
    pem::Pem,
    ring::rand::{SecureRandom, SystemRandom},
    std::{fmt::Formatter, str::FromStr},
    thiserror::Error,
    zeroize::Zeroizing,
};

const PROC_TYPE: &str = "Proc-Type";
const PROC_TYPE_ENCRYPTED: &str = "4,ENCRYPTED";
const DEK_INFO: &str = "DEK-Info";

/// Size of the `EVP_BytesToKey()` salt, taken from the front of the IV.
const SALT_SIZE: usize = 8;

/// Errors from the legacy PEM cipher.
#[derive(Debug, Error)]
pub enum LegacyPemError {
    #[error("DEK-Info header missing")]
    MissingDekInfo,

    #[error("malformed DEK-Info header: {0}")]
    MalformedDekInfo(String),

    #[error("unknown PEM cipher: {0}")]
    UnknownCipher(String),

    #[error("invalid IV encoding: {0}")]
    InvalidIvHex(hex::FromHexError),

    #[error("IV must be {0} bytes; got {1}")]
    InvalidIvLength(usize, usize),

    #[error("encrypted data is not a multiple of the {0} byte block size")]
    NotBlockAligned(usize),

    #[error("invalid cipher key or IV length")]
    CipherInit,

    #[error("decryption failed; incorrect password")]
    IncorrectPassword,
}

/// A cipher usable for legacy PEM encryption.
///
/// The string form is the name used in the `DEK-Info` header.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PemCipher {
    /// Single DES in CBC mode.
    DesCbc,

    /// Triple DES (EDE, 3 keys) in CBC mode.
    DesEde3Cbc,

    /// AES with a 128-bit key in CBC mode.
    Aes128Cbc,

    /// AES with a 192-bit key in CBC mode.
    Aes192Cbc,

    /// AES with a 256-bit key in CBC mode.
    ///
    /// This is what OpenSSL uses for `-aes256` and is the default.
    #[default]
    Aes256Cbc,
}

impl PemCipher {
    /// Obtain all variants of this type.
    pub fn all() -> &'static [Self] {
        &[
            Self::DesCbc,
            Self::DesEde3Cbc,
            Self::Aes128Cbc,
            Self::Aes192Cbc,
            Self::Aes256Cbc,
        ]
    }

    /// The name of this cipher in a `DEK-Info` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DesCbc => "DES-CBC",
            Self::DesEde3Cbc => "DES-EDE3-CBC",
            Self::Aes128Cbc => "AES-128-CBC",
            Self::Aes192Cbc => "AES-192-CBC",
            Self::Aes256Cbc => "AES-256-CBC",
        }
    }

    /// Size in bytes of the cipher key.
    pub fn key_size(&self) -> usize {
        match self {
            Self::DesCbc => 8,
            Self::DesEde3Cbc => 24,
            Self::Aes128Cbc => 16,
            Self::Aes192Cbc => 24,
            Self::Aes256Cbc => 32,
        }
    }

    /// Size in bytes of a cipher block. This is also the IV size.
    pub fn block_size(&self) -> usize {
        match self {
            Self::DesCbc | Self::DesEde3Cbc => 8,
            Self::Aes128Cbc | Self::Aes192Cbc | Self::Aes256Cbc => 16,
        }
    }

    fn decrypt(
        &self,
        key: &[u8],
        iv: &[u8],
        data: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, LegacyPemError> {
        if data.is_empty() || data.len() % self.block_size() != 0 {
            return Err(LegacyPemError::NotBlockAligned(self.block_size()));
        }

        match self {
            Self::DesCbc => cbc_decrypt::<des::Des>(key, iv, data),
            Self::DesEde3Cbc => cbc_decrypt::<des::TdesEde3>(key, iv, data),
            Self::Aes128Cbc => cbc_decrypt::<aes::Aes128>(key, iv, data),
            Self::Aes192Cbc => cbc_decrypt::<aes::Aes192>(key, iv, data),
            Self::Aes256Cbc => cbc_decrypt::<aes::Aes256>(key, iv, data),
        }
    }

    fn encrypt(&self, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, LegacyPemError> {
        match self {
            Self::DesCbc => cbc_encrypt::<des::Des>(key, iv, data),
            Self::DesEde3Cbc => cbc_encrypt::<des::TdesEde3>(key, iv, data),
            Self::Aes128Cbc => cbc_encrypt::<aes::Aes128>(key, iv, data),
            Self::Aes192Cbc => cbc_encrypt::<aes::Aes192>(key, iv, data),
            Self::Aes256Cbc => cbc_encrypt::<aes::Aes256>(key, iv, data),
        }
    }
}

impl std::fmt::Display for PemCipher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PemCipher {
    type Err = LegacyPemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|cipher| cipher.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| LegacyPemError::UnknownCipher(s.to_string()))
    }
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Zeroizing<Vec<u8>>, LegacyPemError>
where
    C: BlockCipher + BlockDecryptMut + KeyInit,
{
    cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| LegacyPemError::CipherInit)?
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map(Zeroizing::new)
        // A wrong key virtually always manifests as bad padding.
        .map_err(|_| LegacyPemError::IncorrectPassword)
}

fn cbc_encrypt<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, LegacyPemError>
where
    C: BlockCipher + BlockEncryptMut + KeyInit,
{
    Ok(cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| LegacyPemError::CipherInit)?
        .encrypt_padded_vec_mut::<Pkcs7>(data))
}

/// Derive a cipher key from a password the way OpenSSL's `EVP_BytesToKey()` does.
///
/// Uses MD5 with a single iteration:
/// `D_i = MD5(D_{i-1} || password || salt)`, concatenated until `key_size`
/// bytes are available.
pub fn derive_key(password: &[u8], salt: &[u8], key_size: usize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(Vec::with_capacity(key_size + 16));

    while key.len() < key_size {
        let mut hasher = Md5::new();
        if !key.is_empty() {
            hasher.update(&key[key.len() - 16..]);
        }
        hasher.update(password);
        hasher.update(salt);

        key.extend_from_slice(&hasher.finalize());
    }

    key.truncate(key_size);

    key
}

/// Parse the value of a `DEK-Info` header into its cipher and IV.
fn parse_dek_info(value: &str) -> Result<(PemCipher, Vec<u8>), LegacyPemError> {
    let (name, iv) = value
        .split_once(',')
        .ok_or_else(|| LegacyPemError::MalformedDekInfo(value.to_string()))?;

    let cipher = PemCipher::from_str(name.trim())?;
    let iv = hex::decode(iv.trim()).map_err(LegacyPemError::InvalidIvHex)?;

    if iv.len() != cipher.block_size() {
        return Err(LegacyPemError::InvalidIvLength(cipher.block_size(), iv.len()));
    }

    Ok((cipher, iv))
}

/// Whether a PEM block is protected with legacy PEM encryption.
///
/// This only looks for the `DEK-Info` header.
pub fn is_encrypted_pem_block(pem: &Pem) -> bool {
    pem.headers().get(DEK_INFO).is_some()
}

/// Decrypt the payload of a legacy encrypted PEM block.
///
/// An empty password is refused with [PrivateKeyError::MissingPassword].
/// Cipher failures, including a wrong password, are reported as
/// [PrivateKeyError::Decryption].
pub fn decrypt_pem_block(pem: &Pem, password: &Password) -> Result<Zeroizing<Vec<u8>>, PrivateKeyError> {
    if password.is_empty() {
        return Err(PrivateKeyError::MissingPassword);
    }

    let dek_info = pem
        .headers()
        .get(DEK_INFO)
        .ok_or(LegacyPemError::MissingDekInfo)?;
    let (cipher, iv) = parse_dek_info(dek_info)?;

    debug!("decrypting {} PEM block with {}", pem.tag(), cipher);

    let key = derive_key(password, &iv[..SALT_SIZE], cipher.key_size());

    Ok(cipher.decrypt(&key, &iv, pem.contents())?)
}

/// Produce a legacy encrypted PEM block holding `data`.
///
/// A random IV is drawn from the system RNG.
pub fn encrypt_pem_block(
    tag: &str,
    data: &[u8],
    password: &Password,
    cipher: PemCipher,
) -> Result<Pem, PrivateKeyError> {
    if password.is_empty() {
        return Err(PrivateKeyError::MissingPassword);
    }

    let mut iv = vec![0u8; cipher.block_size()];
    SystemRandom::new()
        .fill(&mut iv)
        .map_err(|_| PrivateKeyError::Random)?;

    debug!("encrypting {} PEM block with {}", tag, cipher);

    let key = derive_key(password, &iv[..SALT_SIZE], cipher.key_size());
    let ciphertext = cipher.encrypt(&key, &iv, data)?;

    let mut pem = Pem::new(tag, ciphertext);
    let headers = pem.headers_mut();
    headers
        .add(PROC_TYPE, PROC_TYPE_ENCRYPTED)
        .map_err(PrivateKeyError::PemEncode)?;
    headers
        .add(
            DEK_INFO,
            &format!("{},{}", cipher.as_str(), hex::encode_upper(&iv)),
        )
        .map_err(PrivateKeyError::PemEncode)?;

    Ok(pem)
}
