//! Oracle market-map and currency-pair payloads.
//!
//! Covers both the consolidated change actions of the current protocol and
//! the split add/remove/upsert kinds that preceded them.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CurrencyPair {
    #[prost(string, tag = "1")]
    pub base: String,
    #[prost(string, tag = "2")]
    pub quote: String,
}

impl CurrencyPair {
    /// Canonical `BASE/QUOTE` ticker form.
    pub fn ticker(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CurrencyPairs {
    #[prost(message, repeated, tag = "1")]
    pub pairs: Vec<CurrencyPair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CurrencyPairsChange {
    #[prost(oneof = "currency_pairs_change::Value", tags = "1, 2")]
    pub value: Option<currency_pairs_change::Value>,
}

pub mod currency_pairs_change {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        Addition(super::CurrencyPairs),
        #[prost(message, tag = "2")]
        Removal(super::CurrencyPairs),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ticker {
    #[prost(message, optional, tag = "1")]
    pub currency_pair: Option<CurrencyPair>,
    #[prost(uint64, tag = "2")]
    pub decimals: u64,
    #[prost(uint64, tag = "3")]
    pub min_provider_count: u64,
    #[prost(bool, tag = "4")]
    pub enabled: bool,
    #[prost(string, tag = "5")]
    pub metadata_json: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProviderConfig {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub off_chain_ticker: String,
    #[prost(message, optional, tag = "3")]
    pub normalize_by_pair: Option<CurrencyPair>,
    #[prost(bool, tag = "4")]
    pub invert: bool,
    #[prost(string, tag = "5")]
    pub metadata_json: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Market {
    #[prost(message, optional, tag = "1")]
    pub ticker: Option<Ticker>,
    #[prost(message, repeated, tag = "2")]
    pub provider_configs: Vec<ProviderConfig>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Markets {
    #[prost(message, repeated, tag = "1")]
    pub markets: Vec<Market>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MarketsChange {
    #[prost(oneof = "markets_change::Value", tags = "1, 2, 3")]
    pub value: Option<markets_change::Value>,
}

pub mod markets_change {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        Creation(super::Markets),
        #[prost(message, tag = "2")]
        Removal(super::Markets),
        #[prost(message, tag = "3")]
        Update(super::Markets),
    }
}

/// Legacy split oracle kinds, pre-consolidation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddCurrencyPairs {
    #[prost(message, repeated, tag = "1")]
    pub pairs: Vec<CurrencyPair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveCurrencyPairs {
    #[prost(message, repeated, tag = "1")]
    pub pairs: Vec<CurrencyPair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpsertMarkets {
    #[prost(message, repeated, tag = "1")]
    pub markets: Vec<Market>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveMarkets {
    #[prost(string, repeated, tag = "1")]
    pub markets: Vec<String>,
}
