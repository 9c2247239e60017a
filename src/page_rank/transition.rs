use super::check_damping;
use crate::{Corpus, Error, Ranks, Result};
use algograph::graph::VertexId;

/// Where a random surfer on `page` goes next.
///
/// A dangling page sends the surfer anywhere with probability `1/N`.
/// Otherwise every page gets `(1-d)/N`, and each of the `L` pages linked
/// from `page` gets another `d/L`.
pub fn transition_model(corpus: &Corpus, page: &VertexId, damping: f64) -> Result<Ranks> {
    let weights = transition_weights(corpus, page, damping)?;
    Ok(corpus.pages().iter().copied().zip(weights).collect())
}

/// Same distribution as [`transition_model`], laid out along [`Corpus::pages`].
pub fn transition_weights(corpus: &Corpus, page: &VertexId, damping: f64) -> Result<Vec<f64>> {
    check_damping(damping)?;
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    if !corpus.contains(page) {
        return Err(Error::UnknownPage(format!("{page:?}")));
    }

    let n = corpus.len();
    let links = corpus.out_degree(page);
    if links == 0 {
        return Ok(vec![1.0 / (n as f64); n]);
    }
    let mut weights = vec![(1.0 - damping) / (n as f64); n];
    let unit = damping / (links as f64);
    for v in corpus.links(page) {
        let i = corpus
            .position(&v)
            .ok_or_else(|| Error::InvalidGraph(format!("link to unknown vertex {v:?}")))?;
        weights[i] += unit;
    }
    Ok(weights)
}
