//! Reference data reports: status labels, models and manufacturers.

use super::{Report, ReportBuilder, Reporter};
use crate::error::Result;
use crate::models::Record;
use crate::traits::Transport;

fn model_table() -> ReportBuilder {
    ReportBuilder::new(&["id", "name", "manufacturer.name", "assets_count"])
        .sort_by("manufacturer.name")
        .headings(&["ID", "Name", "Manufacturer", "Num_Assets"])
}

impl<T: Transport> Reporter<T> {
    pub async fn statuses(&self) -> Result<Report> {
        let statuses = self.inventory.statuses().await?;
        Ok(ReportBuilder::new(&["id", "type", "name"])
            .sort_by("type")
            .headings(&["ID", "Type", "Name"])
            .build(&statuses))
    }

    pub async fn models(&self) -> Result<Report> {
        let models = self.inventory.models().await?;
        Ok(model_table().build(&models))
    }

    pub async fn laptop_models(&self) -> Result<Report> {
        let models: Vec<Record> = self.inventory.laptop_models().await?;
        Ok(model_table().build(&models))
    }

    pub async fn manufacturers(&self) -> Result<Report> {
        let manufacturers = self.inventory.manufacturers().await?;
        Ok(ReportBuilder::new(&["id", "name", "assets_count"])
            .sort_by("name")
            .headings(&["ID", "Name", "Num_Assets"])
            .build(&manufacturers))
    }
}
