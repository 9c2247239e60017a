use crate::{Error, Ranks, Result};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A fixed set of named pages and the links between them.
///
/// Every link target is itself a page of the corpus and no page links to
/// itself. Pages are kept in name order; that order is what [`Corpus::pages`]
/// returns and what the estimators iterate in.
pub struct Corpus {
    graph: directed::TreeBackedGraph,
    pages: Vec<VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
    vertices: HashMap<String, VertexId, ahash::RandomState>,
    positions: HashMap<VertexId, usize, ahash::RandomState>,
}

impl Corpus {
    /// Builds a corpus from `(page, targets)` pairs.
    ///
    /// Repeated pages and repeated targets are merged. A self-link or a link
    /// to a name that is not a page is rejected with [`Error::InvalidGraph`].
    pub fn new<I, K, L, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut links_by_page: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in links {
            links_by_page
                .entry(page.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }
        for (page, targets) in links_by_page.iter() {
            for target in targets.iter() {
                if target == page {
                    return Err(Error::InvalidGraph(format!("{page} links to itself")));
                }
                if !links_by_page.contains_key(target) {
                    return Err(Error::InvalidGraph(format!(
                        "{page} links to {target}, which is not in the corpus"
                    )));
                }
            }
        }

        let mut graph = directed::TreeBackedGraph::new();
        let mut pages = Vec::with_capacity(links_by_page.len());
        let mut names = HashMap::with_hasher(ahash::RandomState::new());
        let mut vertices = HashMap::with_hasher(ahash::RandomState::new());
        let mut positions = HashMap::with_hasher(ahash::RandomState::new());
        for page in links_by_page.keys() {
            let v = graph.add_vertex();
            positions.insert(v, pages.len());
            pages.push(v);
            names.insert(v, page.clone());
            vertices.insert(page.clone(), v);
        }
        for (page, targets) in links_by_page.iter() {
            let u = vertices[page];
            for target in targets.iter() {
                graph.add_edge(u, vertices[target]);
            }
        }
        tracing::debug!(
            pages = pages.len(),
            links = graph.edge_size(),
            "corpus built"
        );
        Ok(Self {
            graph,
            pages,
            names,
            vertices,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All pages, sorted by name.
    pub fn pages(&self) -> &[VertexId] {
        &self.pages
    }

    pub fn graph(&self) -> &directed::TreeBackedGraph {
        &self.graph
    }

    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices.get(name).copied()
    }

    pub fn name(&self, v: &VertexId) -> Option<&str> {
        self.names.get(v).map(String::as_str)
    }

    /// Index of `v` within [`Corpus::pages`].
    pub fn position(&self, v: &VertexId) -> Option<usize> {
        self.positions.get(v).copied()
    }

    pub fn contains(&self, v: &VertexId) -> bool {
        self.positions.contains_key(v)
    }

    pub fn links(&self, v: &VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(v).map(|e| e.sink)
    }

    pub fn out_degree(&self, v: &VertexId) -> usize {
        self.graph.out_edges(v).count()
    }

    pub fn is_dangling(&self, v: &VertexId) -> bool {
        self.graph.out_edges(v).next().is_none()
    }

    /// Re-keys `ranks` by page name. Vertices outside the corpus are dropped.
    pub fn named(&self, ranks: &Ranks) -> BTreeMap<String, f64> {
        ranks
            .iter()
            .filter_map(|(v, w)| self.name(v).map(|name| (name.to_string(), *w)))
            .collect()
    }

    pub(crate) fn describe(&self, v: &VertexId) -> String {
        match self.name(v) {
            Some(name) => name.to_string(),
            None => format!("{v:?}"),
        }
    }
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut m = f.debug_map();
        for u in self.pages.iter() {
            let mut targets: Vec<_> = self.links(u).map(|v| self.describe(&v)).collect();
            targets.sort();
            m.entry(&self.describe(u), &targets);
        }
        m.finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use quickcheck::Arbitrary;

    pub fn corpus(links: &[(&str, &[&str])]) -> Corpus {
        Corpus::new(links.iter().map(|(p, ts)| (*p, ts.iter().copied()))).unwrap()
    }

    #[derive(Debug, Clone)]
    pub struct RandomCorpus {
        pub links: BTreeMap<String, BTreeSet<String>>,
    }

    impl RandomCorpus {
        pub fn corpus(&self) -> Corpus {
            Corpus::new(self.links.clone()).unwrap()
        }
    }

    impl Arbitrary for RandomCorpus {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            const N: usize = 10;

            let n: usize = usize::arbitrary(g) % N + 1;
            let names: Vec<_> = (0..n).map(|i| format!("{i}.html")).collect();
            let mut links: BTreeMap<_, BTreeSet<_>> =
                names.iter().map(|p| (p.clone(), BTreeSet::new())).collect();
            for _ in 0..(n + n.isqrt()) {
                let u = &names[usize::arbitrary(g) % n];
                let v = &names[usize::arbitrary(g) % n];
                if u != v {
                    links.get_mut(u).unwrap().insert(v.clone());
                }
            }
            Self { links }
        }
    }

    #[test]
    fn pages_in_name_order() {
        let c = corpus(&[("b", &["a"]), ("c", &[]), ("a", &["b", "c"])]);
        let names: Vec<_> = c.pages().iter().map(|v| c.name(v).unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        for (i, v) in c.pages().iter().enumerate() {
            assert_eq!(c.position(v), Some(i));
        }
    }

    #[test]
    fn links_and_degrees() {
        let c = corpus(&[("a", &["b", "c"]), ("b", &["a"]), ("c", &[])]);
        let a = c.vertex("a").unwrap();
        let b = c.vertex("b").unwrap();
        let cc = c.vertex("c").unwrap();
        assert_eq!(c.out_degree(&a), 2);
        assert_eq!(c.out_degree(&b), 1);
        assert!(c.is_dangling(&cc));
        assert!(!c.is_dangling(&a));
        let mut targets: Vec<_> = c.links(&a).collect();
        targets.sort();
        let mut oracle = vec![b, cc];
        oracle.sort();
        assert_eq!(targets, oracle);
    }

    #[test]
    fn duplicates_are_merged() {
        let c = Corpus::new([("a", vec!["b", "b"]), ("b", vec![]), ("a", vec!["b"])]).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.out_degree(&c.vertex("a").unwrap()), 1);
    }

    #[test]
    fn self_link_is_rejected() {
        let res = Corpus::new([("a", vec!["a"])]);
        assert!(matches!(res, Err(Error::InvalidGraph(_))), "{res:?}");
    }

    #[test]
    fn link_outside_corpus_is_rejected() {
        let res = Corpus::new([("a", vec!["b"])]);
        assert!(matches!(res, Err(Error::InvalidGraph(_))), "{res:?}");
    }

    #[test]
    fn empty() {
        let c = Corpus::new(Vec::<(String, Vec<String>)>::new()).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn named_ranks() {
        let c = corpus(&[("a", &["b"]), ("b", &[])]);
        let ranks: Ranks = c.pages().iter().map(|v| (*v, 0.5)).collect();
        let named = c.named(&ranks);
        assert_eq!(named.len(), 2);
        assert_eq!(named["a"], 0.5);
        assert_eq!(named["b"], 0.5);
    }

    #[test]
    fn debug_lists_links_by_name() {
        let c = corpus(&[("a", &["b"]), ("b", &[])]);
        assert_eq!(format!("{c:?}"), r#"{"a": ["b"], "b": []}"#);
    }
}
