//! User reports.

use serde_json::Value;

use super::{Report, ReportBuilder, Reporter};
use crate::error::Result;
use crate::models::{laptop_count, Cohort, Os, Record};
use crate::traits::Transport;

fn user_table() -> ReportBuilder {
    ReportBuilder::new(&["id", "username", "laptops"])
        .sort_by("username")
        .headings(&["ID", "Username", "Laptops"])
}

impl<T: Transport> Reporter<T> {
    /// Every user with the laptops assigned to them.
    pub async fn users(&self) -> Result<Report> {
        let users = self.inventory.users().await?;
        Ok(user_table().build(&users))
    }

    /// Assigned laptops in a cohort whose manufacturer matches `os`.
    pub async fn users_by_os(&self, cohort: Cohort, os: Os) -> Result<Report> {
        let laptops = self.inventory.laptops(cohort).await?;
        let matching: Vec<Record> = laptops
            .iter()
            .filter(|laptop| {
                let assigned = laptop.get("assigned_to").is_some_and(|a| !a.is_null());
                let manufacturer = laptop.get("manufacturer").unwrap_or(&Value::Null);
                assigned && os.matches(manufacturer)
            })
            .cloned()
            .collect();

        Ok(
            ReportBuilder::new(&["asset_tag", "assigned_to.username", "manufacturer.name", "model.name"])
                .sort_by("assigned_to.username")
                .headings(&["Asset Tag", "Assigned To", "Manufacturer", "Model"])
                .build(&matching),
        )
    }

    /// Users without any active laptop.
    pub async fn users_with_no_assets(&self) -> Result<Report> {
        let users = self.inventory.users_without_laptops().await?;
        Ok(user_table().build(&users))
    }

    /// Users holding two or more active laptops.
    pub async fn users_with_multiple_assets(&self) -> Result<Report> {
        let users = self.inventory.users().await?;
        let multiple: Vec<Record> = users
            .iter()
            .filter(|user| laptop_count(user) >= 2)
            .cloned()
            .collect();
        Ok(user_table().build(&multiple))
    }
}
