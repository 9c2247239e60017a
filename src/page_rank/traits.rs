use crate::{Corpus, Ranks, Result};

pub trait PageRank {
    type Output: PageRankResult;

    fn calc(&self) -> Result<Self::Output>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &Ranks;
    fn debug<'a>(&'a self, corpus: &'a Corpus) -> impl std::fmt::Debug + 'a;
}
