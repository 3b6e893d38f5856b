use std::{fmt, str::FromStr};

use primitives::BallotId;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

pub const CAPABILITY_SECRET_LENGTH: usize = 32;
pub const CAPABILITY_TOKEN_SEPARATOR: char = '.';

/// SHA-256 of a capability secret. This is all a ballot keeps of it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityDigest([u8; 32]);

impl CapabilityDigest {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for CapabilityDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityDigest({})", self.to_hex())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CapabilityParseError {
    #[error("capability token must look like <ballot id>.<secret>")]
    MalformedToken,

    #[error("invalid ballot id in capability token: {0}")]
    BallotId(#[from] primitives::Error),

    #[error("invalid capability secret: {0}")]
    Secret(#[from] hex::FromHexError),
}

/// Proof of the right to finalize one particular ballot.
///
/// A capability is minted exactly once, alongside its ballot, and is the only
/// credential accepted when ending the vote. It carries a random secret whose
/// digest the ballot remembers, so knowing a ballot id is not enough to forge
/// one. The token form `<ballot id>.<hex secret>` lets it travel out of band
/// to the creator and back.
#[derive(PartialEq, Eq)]
pub struct CreatorCapability {
    ballot_id: BallotId,
    secret: [u8; CAPABILITY_SECRET_LENGTH],
}

impl CreatorCapability {
    pub(crate) fn mint(ballot_id: BallotId) -> Self {
        let mut secret = [0u8; CAPABILITY_SECRET_LENGTH];
        OsRng.fill_bytes(&mut secret);

        Self { ballot_id, secret }
    }

    /// The ballot this capability is bound to.
    pub fn ballot_id(&self) -> BallotId {
        self.ballot_id
    }

    pub fn digest(&self) -> CapabilityDigest {
        CapabilityDigest(Sha256::digest(self.secret).into())
    }

    pub fn to_token(&self) -> String {
        format!(
            "{}{}{}",
            self.ballot_id,
            CAPABILITY_TOKEN_SEPARATOR,
            hex::encode(self.secret)
        )
    }
}

impl fmt::Debug for CreatorCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorCapability")
            .field("ballot_id", &self.ballot_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for CreatorCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl FromStr for CreatorCapability {
    type Err = CapabilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ballot_id, secret_hex) = s
            .trim()
            .split_once(CAPABILITY_TOKEN_SEPARATOR)
            .ok_or(CapabilityParseError::MalformedToken)?;

        let ballot_id = ballot_id.parse::<BallotId>()?;

        let mut secret = [0u8; CAPABILITY_SECRET_LENGTH];
        hex::decode_to_slice(secret_hex, &mut secret)?;

        Ok(Self { ballot_id, secret })
    }
}
