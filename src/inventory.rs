//! Cached access to the Snipe-IT resources the reports are built from.

use serde_json::Value;

use crate::cache::{CacheKey, Collection, RecordCache};
use crate::error::{Result, SnipeError};
use crate::models::{
    attach_assets, manufacturer_names, partition_cohort, resolve, Cohort, Record,
};
use crate::query::{Filter, QueryAggregator};
use crate::traits::Transport;

/// Snipe-IT category holding laptops.
pub const LAPTOP_CATEGORY_ID: u64 = 1;

/// Category name used to pick laptop models.
pub const LAPTOP_CATEGORY_NAME: &str = "Laptop";

const HARDWARE: &str = "hardware";
const USERS: &str = "users";
const MODELS: &str = "models";
const MANUFACTURERS: &str = "manufacturers";
const STATUS_LABELS: &str = "statuslabels";

const STATUS_REQUESTABLE: &str = "Requestable";
const STATUS_ARCHIVED: &str = "Archived";

/// Inventory records for one process, each listing fetched at most once.
///
/// # Example
///
/// ```ignore
/// use snipe_report::{Cohort, Inventory, SnipeClient};
///
/// let client = SnipeClient::new("token", "https://snipeit.example.org/api/v1/")?;
/// let inventory = Inventory::from_transport(client);
/// let spares = inventory.laptops(Cohort::Spares).await?;
/// println!("{} spare laptops", spares.len());
/// ```
#[derive(Debug)]
pub struct Inventory<T> {
    aggregator: QueryAggregator<T>,
    cache: RecordCache,
}

impl<T: Transport> Inventory<T> {
    pub fn new(aggregator: QueryAggregator<T>) -> Self {
        Self {
            aggregator,
            cache: RecordCache::new(),
        }
    }

    /// Inventory over `transport` with the default pagination policy.
    pub fn from_transport(transport: T) -> Self {
        Self::new(QueryAggregator::new(transport))
    }

    pub fn aggregator(&self) -> &QueryAggregator<T> {
        &self.aggregator
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    // --------------------------------------------------------
    // Laptops
    // --------------------------------------------------------

    /// Laptops in the given cohort.
    pub async fn laptops(&self, cohort: Cohort) -> Result<Collection> {
        match cohort {
            Cohort::Active => self.active_laptops().await,
            Cohort::Staff => self.staff_laptops().await,
            Cohort::Spares => self.spare_laptops().await,
            Cohort::Archived => self.archived_laptops().await,
        }
    }

    /// Every laptop that is not archived.
    pub async fn active_laptops(&self) -> Result<Collection> {
        self.fetch_laptops(Cohort::Active, None).await
    }

    /// Non-archived laptops with the `Requestable` status.
    pub async fn spare_laptops(&self) -> Result<Collection> {
        self.fetch_laptops(Cohort::Spares, Some(STATUS_REQUESTABLE))
            .await
    }

    /// Laptops in the archived state.
    pub async fn archived_laptops(&self) -> Result<Collection> {
        self.fetch_laptops(Cohort::Archived, Some(STATUS_ARCHIVED))
            .await
    }

    /// Active laptops that are not spares, checked out or not.
    pub async fn staff_laptops(&self) -> Result<Collection> {
        self.cache
            .get_or_fetch(CacheKey::Laptops(Cohort::Staff), || async {
                let active = self.active_laptops().await?;
                let spares = self.spare_laptops().await?;
                Ok(partition_cohort(&active, &spares))
            })
            .await
    }

    async fn fetch_laptops(&self, cohort: Cohort, status: Option<&str>) -> Result<Collection> {
        let mut filter = Filter::new().with("category_id", LAPTOP_CATEGORY_ID);
        if let Some(status) = status {
            filter = filter.with("status", status);
        }

        self.cache
            .get_or_fetch(CacheKey::Laptops(cohort), || {
                self.aggregator.fetch_rows(HARDWARE, &filter)
            })
            .await
    }

    /// One laptop by asset tag. Not cached.
    ///
    /// # Errors
    ///
    /// Returns [`SnipeError::NotFound`] when Snipe-IT reports no such tag.
    #[tracing::instrument(skip(self))]
    pub async fn get_laptop(&self, asset_tag: &str) -> Result<Value> {
        let path = format!("{HARDWARE}/bytag/{}", urlencoding::encode(asset_tag));
        let laptop = self.aggregator.fetch_one(&path).await?;

        // Snipe-IT answers unknown tags with 200 and an error envelope
        if laptop.get("status").and_then(Value::as_str) == Some("error") {
            return Err(SnipeError::NotFound {
                entity_type: "Asset",
                id: asset_tag.to_string(),
            });
        }

        Ok(laptop)
    }

    // --------------------------------------------------------
    // Other
    // --------------------------------------------------------

    /// All users, each with a `laptops` field listing assigned active laptops.
    pub async fn users(&self) -> Result<Collection> {
        self.cache
            .get_or_fetch(CacheKey::Users, || async {
                let mut users = self.aggregator.fetch_rows(USERS, &Filter::new()).await?;
                let laptops = self.active_laptops().await?;
                attach_assets(&mut users, &laptops);
                Ok(users)
            })
            .await
    }

    /// Users with no active laptop assigned.
    pub async fn users_without_laptops(&self) -> Result<Vec<Record>> {
        let users = self.users().await?;
        Ok(users
            .iter()
            .filter(|user| user.get("laptops").map_or(true, Value::is_null))
            .cloned()
            .collect())
    }

    pub async fn models(&self) -> Result<Collection> {
        self.fetch_all(CacheKey::Models, MODELS).await
    }

    /// Models in the laptop category.
    pub async fn laptop_models(&self) -> Result<Vec<Record>> {
        let models = self.models().await?;
        Ok(models
            .iter()
            .filter(|model| resolve(model, "category.name").as_str() == Some(LAPTOP_CATEGORY_NAME))
            .cloned()
            .collect())
    }

    pub async fn manufacturers(&self) -> Result<Collection> {
        self.fetch_all(CacheKey::Manufacturers, MANUFACTURERS).await
    }

    /// Manufacturer names that appear on any model, in first-seen order.
    pub async fn laptop_manufacturers(&self) -> Result<Vec<String>> {
        let models = self.models().await?;
        Ok(manufacturer_names(&models))
    }

    pub async fn statuses(&self) -> Result<Collection> {
        self.fetch_all(CacheKey::Statuses, STATUS_LABELS).await
    }

    async fn fetch_all(&self, key: CacheKey, resource: &str) -> Result<Collection> {
        let filter = Filter::new();
        self.cache
            .get_or_fetch(key, || self.aggregator.fetch_rows(resource, &filter))
            .await
    }
}
