use crate::Corpus;
use algograph::graph::*;
use std::{collections::HashMap, hash::Hash};

pub type Ranks = HashMap<VertexId, f64, ahash::RandomState>;

pub fn norm_1<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).fold(0.0, f64::max)
}

/// `1/N` on every page of `corpus`.
pub fn uniform(corpus: &Corpus) -> Ranks {
    let n = corpus.len() as f64;
    corpus.pages().iter().map(|v| (*v, 1.0 / n)).collect()
}
