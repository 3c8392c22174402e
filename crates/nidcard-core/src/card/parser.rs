//! Strategy selection over the two extractors.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::CardData;

use super::Result;
use super::colon::ColonExtractor;
use super::rowwise::RowWiseExtractor;

/// Which extractor to run over the text layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Script-aware row-wise pairing (primary).
    #[default]
    RowWise,
    /// `key: value` splitting with continuation recovery (fallback).
    ColonDelimited,
}

/// Card parser running the configured extraction strategy.
pub struct CardParser {
    strategy: Strategy,
    rowwise: RowWiseExtractor,
    colon: ColonExtractor,
}

impl CardParser {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            strategy: config.strategy,
            rowwise: RowWiseExtractor::new(config.vocabulary.clone()),
            colon: ColonExtractor::new(config.vocabulary.clone()),
        }
    }

    /// Override the configured strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Parse the extracted text layer into structured card data.
    pub fn parse(&self, text: &str) -> Result<CardData> {
        let lines: Vec<&str> = text.lines().collect();
        info!(
            "parsing {} lines with {:?} strategy",
            lines.len(),
            self.strategy
        );

        match self.strategy {
            Strategy::RowWise => self.rowwise.extract(&lines).map(CardData::Records),
            Strategy::ColonDelimited => Ok(CardData::Colon(self.colon.extract(&lines))),
        }
    }

    /// Compatibility surface: any parser-internal error degrades to an empty
    /// row-wise payload, mirroring the historical behavior of the service
    /// this parser replaces.
    pub fn parse_or_empty(&self, text: &str) -> CardData {
        match self.parse(text) {
            Ok(data) => data,
            Err(e) => {
                error!("card parsing failed: {e}");
                CardData::Records(Vec::new())
            }
        }
    }
}
