use bonding_curve::BondingCurve;
use casper_types::{Key, U256, U512};
use launch_token::LaunchToken;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_SYMBOL_LENGTH: usize = 6;

const TOKEN_TAG: u8 = 1;
const CURVE_TAG: u8 = 2;

/// Arguments to [`TokenFactory::create_launch`](crate::TokenFactory::create_launch)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchRequest {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    /// Reserve spent on an immediate buy for the creator, zero for none
    pub initial_buy: U512,
    pub min_asset_out: U256,
}

impl LaunchRequest {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_initial_buy(mut self, initial_buy: U512, min_asset_out: U256) -> Self {
        self.initial_buy = initial_buy;
        self.min_asset_out = min_asset_out;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchMeta {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub creator: Key,
    pub created_at: u64,
}

/// One ledger and the curve that mints it
#[derive(Debug)]
pub struct Launch {
    pub(crate) id: u64,
    pub(crate) token: LaunchToken,
    pub(crate) curve: BondingCurve,
    pub(crate) meta: LaunchMeta,
}

impl Launch {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn token(&self) -> &LaunchToken {
        &self.token
    }

    pub fn curve(&self) -> &BondingCurve {
        &self.curve
    }

    pub fn meta(&self) -> &LaunchMeta {
        &self.meta
    }
}

pub(crate) fn token_key(registry: &Key, launch_id: u64) -> Key {
    derive_key(registry, TOKEN_TAG, launch_id)
}

pub(crate) fn curve_key(registry: &Key, launch_id: u64) -> Key {
    derive_key(registry, CURVE_TAG, launch_id)
}

// tag | launch id | registry prefix
fn derive_key(registry: &Key, tag: u8, launch_id: u64) -> Key {
    let mut hash = [0u8; 32];
    hash[0] = tag;
    hash[1..9].copy_from_slice(&launch_id.to_le_bytes());
    if let Key::Hash(registry_hash) = registry {
        hash[9..].copy_from_slice(&registry_hash[..23]);
    }
    Key::Hash(hash)
}

pub(crate) fn validate_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_LENGTH
}

pub(crate) fn validate_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.len() <= MAX_SYMBOL_LENGTH
}
