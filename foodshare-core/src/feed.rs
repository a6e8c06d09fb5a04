//! Where listings and ratings come from, and how pushed updates reach the view.
//!
//! The backend owns the data; this module only describes it as two async
//! collaborators and re-runs [`build_view`] whenever something changes.

use anyhow::Context;
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use serde_with::{serde_as, VecSkipError};
use std::{collections::HashMap, path::Path, sync::Arc};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::{
    models::{Listing, Rating},
    pipeline::{build_view, ListingView, Query},
};

/// Supplies the current set of listings.
#[async_trait]
pub trait ListingSource {
    async fn listings(&self) -> anyhow::Result<Vec<Listing>>;
}

/// Supplies the ratings of one listing.
#[async_trait]
pub trait RatingSource {
    async fn ratings(&self, listing_id: &str) -> anyhow::Result<Vec<Rating>>;
}

/// Everything the browse page needs at one point in time.
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub listings: Vec<Listing>,
    /// Keyed by listing id. Rating records that fail to parse are dropped.
    #[serde(default)]
    #[serde_as(as = "HashMap<_, VecSkipError<_>>")]
    pub ratings: HashMap<String, Vec<Rating>>,
}

impl Snapshot {
    /// Fetch every listing, then every listing's ratings concurrently.
    ///
    /// A listing whose ratings cannot be fetched is shown as unrated rather than
    /// failing the whole page.
    ///
    /// # Errors
    /// Errors only if the listings themselves cannot be fetched.
    pub async fn load<L, R>(listing_source: &L, rating_source: &R) -> anyhow::Result<Self>
    where
        L: ListingSource + Sync + ?Sized,
        R: RatingSource + Sync + ?Sized,
    {
        let listings = listing_source
            .listings()
            .await
            .context("could not fetch listings")?;

        let fetches = listings.iter().map(|listing| async move {
            let ratings = match rating_source.ratings(&listing.id).await {
                Ok(ratings) => ratings,
                Err(e) => {
                    tracing::warn!(listing = %listing.id, error = %e, "could not fetch ratings");
                    Vec::new()
                }
            };
            (listing.id.clone(), ratings)
        });
        let ratings = join_all(fetches).await.into_iter().collect();

        tracing::info!(listings = listings.len(), "loaded snapshot");
        Ok(Self { listings, ratings })
    }

    /// Read a snapshot from a JSON file of the form `{ "listings": [..], "ratings": { id: [..] } }`.
    pub async fn read<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("could not read snapshot {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("could not parse snapshot {}", path.display()))
    }

    pub fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }

    pub fn view(&self, query: &Query) -> Vec<ListingView> {
        build_view(&self.listings, &self.ratings, query)
    }
}

#[async_trait]
impl ListingSource for Snapshot {
    async fn listings(&self) -> anyhow::Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}

#[async_trait]
impl RatingSource for Snapshot {
    async fn ratings(&self, listing_id: &str) -> anyhow::Result<Vec<Rating>> {
        Ok(self.ratings.get(listing_id).cloned().unwrap_or_default())
    }
}

/// A continuously updated browse view.
///
/// Owns a task that keeps the latest snapshot and query and publishes a fresh
/// view whenever either changes. The task stops once the snapshot sender is dropped.
pub struct LiveView {
    views: watch::Receiver<Arc<Vec<ListingView>>>,
    handle: JoinHandle<()>,
}

impl LiveView {
    pub fn spawn(
        mut snapshots: mpsc::Receiver<Snapshot>,
        mut queries: watch::Receiver<Query>,
    ) -> Self {
        let (tx, views) = watch::channel(Arc::new(Vec::new()));

        let handle = tokio::spawn(async move {
            let mut snapshot = Snapshot::default();
            let mut queries_open = true;
            loop {
                tokio::select! {
                    next = snapshots.recv() => match next {
                        Some(next) => snapshot = next,
                        None => break,
                    },
                    changed = queries.changed(), if queries_open => {
                        if changed.is_err() {
                            /* keep serving the last query */
                            queries_open = false;
                            continue;
                        }
                    }
                }

                let query = queries.borrow().clone();
                let view = snapshot.view(&query);
                tracing::debug!(shown = view.len(), "publishing live view");
                if tx.send(Arc::new(view)).is_err() {
                    break;
                }
            }
            tracing::debug!("live view stopped");
        });

        Self { views, handle }
    }

    /// A receiver that is notified on every republished view.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<ListingView>>> {
        self.views.clone()
    }

    pub fn current(&self) -> Arc<Vec<ListingView>> {
        self.views.borrow().clone()
    }

    /// Wait for the task to finish (after the snapshot sender has been dropped).
    pub async fn join(self) -> anyhow::Result<()> {
        self.handle.await.context("live view task panicked")
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;
    use async_trait::async_trait;
    use maplit::hashmap;
    use serde_json::json;
    use std::{collections::HashMap, convert::TryFrom};
    use tokio::sync::{mpsc, watch};

    use super::{LiveView, ListingSource, RatingSource, Snapshot};
    use crate::{
        models::{Listing, Rating, Score},
        pipeline::{Query, SortOrder},
    };

    fn listing(id: &str, title: &str, price: f64) -> Listing {
        Listing {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price: Some(price),
            location: "Malleshwaram".into(),
            pickup_time: String::new(),
            image_url: String::new(),
            quantity: None,
            user_id: None,
            created_at: None,
        }
    }

    fn rating(listing_id: &str, score: u8) -> Rating {
        Rating {
            id: String::new(),
            listing_id: listing_id.into(),
            rating: Score::try_from(score).unwrap(),
            text: String::new(),
            created_at: None,
            user_id: String::new(),
            user_name: None,
            user_photo: None,
        }
    }

    struct FlakyRatings {
        ratings: HashMap<String, Vec<Rating>>,
    }

    #[async_trait]
    impl RatingSource for FlakyRatings {
        async fn ratings(&self, listing_id: &str) -> anyhow::Result<Vec<Rating>> {
            match self.ratings.get(listing_id) {
                Some(ratings) => Ok(ratings.clone()),
                None => bail!("backend unavailable"),
            }
        }
    }

    #[tokio::test]
    async fn test_load() {
        let listings = Snapshot {
            listings: vec![listing("1", "Bisi Bele Bath", 70.0), listing("2", "Vada", 20.0)],
            ratings: HashMap::new(),
        };
        let ratings = FlakyRatings {
            ratings: hashmap! { "1".to_string() => vec![rating("1", 3), rating("1", 4)] },
        };

        let snapshot = Snapshot::load(&listings, &ratings).await.unwrap();
        assert_eq!(snapshot.listings.len(), 2);
        assert_eq!(snapshot.ratings["1"].len(), 2);
        /* the failed fetch degrades to an empty rating set */
        assert!(snapshot.ratings["2"].is_empty());

        let views = snapshot.view(&Query::default());
        assert_eq!(views[0].listing.id, "2");
        assert_eq!(views[1].summary.avg_rating, 3.5);
    }

    #[tokio::test]
    async fn test_snapshot_as_source() {
        let snapshot = Snapshot {
            listings: vec![listing("1", "Pongal", 45.0)],
            ratings: hashmap! { "1".to_string() => vec![rating("1", 5)] },
        };
        assert_eq!(snapshot.listings().await.unwrap().len(), 1);
        assert_eq!(snapshot.ratings("1").await.unwrap().len(), 1);
        assert!(snapshot.ratings("nope").await.unwrap().is_empty());
        assert_eq!(snapshot.listing("1").unwrap().title, "Pongal");
        assert!(snapshot.listing("2").is_none());
    }

    #[test]
    fn test_parse_skips_bad_ratings() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "listings": [
                { "id": "1", "title": "Rice Bowl", "price": 50, "location": "A" },
                { "id": "2", "title": "Soup", "price": "30", "location": "B" }
            ],
            "ratings": {
                "1": [ { "rating": 4 }, { "rating": 11 }, { "rating": 5 }, { "text": "no score" } ]
            }
        }))
        .unwrap();
        assert_eq!(snapshot.ratings["1"].len(), 2);
        assert!(!snapshot.ratings.contains_key("2"));
        assert_eq!(snapshot.listing("2").unwrap().price, Some(30.0));

        let views = snapshot.view(&Query::default());
        assert_eq!(views[1].summary.avg_rating, 4.5);
        assert_eq!(views[1].summary.review_count, 2);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = Snapshot::read("/definitely/not/here.json").await.unwrap_err();
        assert!(err.to_string().contains("could not read snapshot"));
    }

    #[tokio::test]
    async fn test_live_view() {
        let (snapshot_tx, snapshot_rx) = mpsc::channel(4);
        let (query_tx, query_rx) = watch::channel(Query::default());
        let live = LiveView::spawn(snapshot_rx, query_rx);
        let mut views = live.subscribe();
        assert!(live.current().is_empty());

        snapshot_tx
            .send(Snapshot {
                listings: vec![listing("1", "Masala Dosa", 60.0), listing("2", "Kesari", 25.0)],
                ratings: HashMap::new(),
            })
            .await
            .unwrap();
        views.changed().await.unwrap();
        let ids: Vec<_> = views.borrow().iter().map(|v| v.listing.id.clone()).collect();
        assert_eq!(ids, vec!["2", "1"]);

        query_tx
            .send(Query {
                sort_order: SortOrder::Descending,
                ..Default::default()
            })
            .unwrap();
        views.changed().await.unwrap();
        let ids: Vec<_> = views.borrow().iter().map(|v| v.listing.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        query_tx
            .send(Query {
                search_term: "dosa".into(),
                ..Default::default()
            })
            .unwrap();
        views.changed().await.unwrap();
        assert_eq!(views.borrow().len(), 1);

        drop(snapshot_tx);
        live.join().await.unwrap();
    }
}
