use crate::{
    analyze, build_pool, generate_deck, Analysis, Deck, EngineError, Pool, PoolReport, RawRecord,
    RngState, TitleRules,
};

/// One complete pipeline result. Produced whole or not at all.
#[derive(Debug, Clone)]
pub struct BingoRun {
    pub seed: u64,
    pub pool_report: PoolReport,
    pub pool: Pool,
    pub deck: Deck,
    pub analysis: Analysis,
}

#[derive(Debug, Clone)]
pub struct BingoEngine {
    pub rules: TitleRules,
    pub num_cards: usize,
}

impl BingoEngine {
    pub fn new(rules: TitleRules, num_cards: usize) -> Self {
        Self { rules, num_cards }
    }

    /// normalize -> pool -> deck -> analysis.
    pub fn run<I>(&self, records: I, rng: &mut RngState) -> Result<BingoRun, EngineError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        self.validate()?;
        let built = build_pool(records, &self.rules, rng)?;
        self.run_with_pool(built.pool, built.report, rng)
    }

    /// Runs generation and analysis over a pool the caller already holds.
    pub fn run_with_pool(
        &self,
        pool: Pool,
        pool_report: PoolReport,
        rng: &mut RngState,
    ) -> Result<BingoRun, EngineError> {
        self.validate()?;
        let deck = generate_deck(&pool, self.num_cards, rng)?;
        let analysis = analyze(&deck);
        Ok(BingoRun {
            seed: rng.seed(),
            pool_report,
            pool,
            deck,
            analysis,
        })
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.num_cards == 0 {
            return Err(EngineError::InvalidCardCount(self.num_cards));
        }
        Ok(())
    }
}
