use crate::error::Result;
use crate::normalize::normalize;
use std::collections::HashSet;

/// Set of normalized URLs already discovered.
///
/// Implementations backed by durable storage must have made a recorded URL
/// durable by the time `record` returns.
pub trait VisitedSet {
    fn contains(&self, url: &str) -> Result<bool>;

    /// Inserts `url`, doing nothing if it is already present. Returns whether
    /// it was new.
    fn record(&mut self, url: &str) -> Result<bool>;
}

/// In-memory set, used for dry runs and tests.
impl VisitedSet for HashSet<String> {
    fn contains(&self, url: &str) -> Result<bool> {
        Ok(HashSet::contains(self, url))
    }

    fn record(&mut self, url: &str) -> Result<bool> {
        Ok(self.insert(url.to_string()))
    }
}

/// Lazily turns the links found on one page into the URLs nobody has seen
/// before.
///
/// Each link is normalized against the page it came from and checked against
/// the store; new ones are recorded before being yielded. The sequence is
/// finite and cannot be restarted. A store error is yielded as-is and should
/// end the crawl.
pub struct Discoveries<'a, S: VisitedSet + ?Sized> {
    links: std::vec::IntoIter<String>,
    base: &'a str,
    store: &'a mut S,
}

impl<'a, S: VisitedSet + ?Sized> Discoveries<'a, S> {
    pub fn new(links: Vec<String>, base: &'a str, store: &'a mut S) -> Self {
        Self {
            links: links.into_iter(),
            base,
            store,
        }
    }
}

impl<S: VisitedSet + ?Sized> Iterator for Discoveries<'_, S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.links.by_ref() {
            let url = normalize(&raw, self.base);

            match self.store.contains(&url) {
                Ok(true) => continue,
                Ok(false) => {}
                Err(e) => return Some(Err(e)),
            }

            match self.store.record(&url) {
                Ok(true) => return Some(Ok(url)),
                Ok(false) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hashset_record_is_idempotent() {
        let mut store: HashSet<String> = HashSet::new();
        assert!(store.record("http://host/a").unwrap());
        assert!(!store.record("http://host/a").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_discoveries_yield_only_new_urls() {
        let mut store: HashSet<String> = HashSet::new();
        store.record("http://host/known").unwrap();

        let found: Vec<String> = Discoveries::new(
            links(&["/known", "/new", "http://host/new?dup=1", "/other#x"]),
            "http://host/",
            &mut store,
        )
        .collect::<Result<_>>()
        .unwrap();

        assert_eq!(found, vec!["http://host/new", "http://host/other"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_discoveries_are_lazy() {
        let mut store: HashSet<String> = HashSet::new();
        let mut discoveries =
            Discoveries::new(links(&["/a", "/b"]), "http://host/", &mut store);

        assert_eq!(discoveries.next().unwrap().unwrap(), "http://host/a");
        drop(discoveries);

        // Only the consumed link was recorded.
        assert!(store.contains("http://host/a"));
        assert!(!store.contains("http://host/b"));
    }

    struct BrokenStore;

    impl VisitedSet for BrokenStore {
        fn contains(&self, _url: &str) -> Result<bool> {
            Ok(false)
        }

        fn record(&mut self, _url: &str) -> Result<bool> {
            Err(crate::ScanError::storage(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_discoveries_surface_store_errors() {
        let mut store = BrokenStore;
        let mut discoveries = Discoveries::new(links(&["/a"]), "http://host/", &mut store);

        let err = discoveries.next().unwrap().unwrap_err();
        assert!(err.is_storage());
    }
}
