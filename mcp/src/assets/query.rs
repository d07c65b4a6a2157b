use error_stack::Report;
use itertools::Itertools;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::asset_type::AssetType;
use crate::constants::{
    COMMON_ASSET_SUBDIRS, DEFAULT_LIST_MAX_RESULTS, DEFAULT_RECURSIVE_MAX_RESULTS,
    DEFAULT_SEARCH_PATH, EDITOR_ASSET_LIBRARY, FN_GET_ASSETS_BY_PATH, FN_LIST_ASSETS,
};
use crate::error::{Error, Result};
use crate::params::{ParamKey, ParamMap};
use crate::tool::ToolOutput;
use crate::unreal::{ConnectionManager, Session};

/// Filters for one asset listing
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuery {
    pub asset_type:  AssetType,
    pub search_path: String,
    pub search_term: String,
    pub max_results: usize,
    pub recursive:   bool,
}

impl AssetQuery {
    fn from_params(params: &ParamMap, path_key: ParamKey, default_max: usize) -> Result<Self> {
        Ok(Self {
            asset_type:  AssetType::parse_or_all(params.text(ParamKey::AssetType).as_deref()),
            search_path: params
                .text(path_key)
                .unwrap_or_else(|| DEFAULT_SEARCH_PATH.to_string()),
            search_term: params.text(ParamKey::SearchTerm).unwrap_or_default(),
            max_results: params.count(ParamKey::MaxResults)?.unwrap_or(default_max),
            recursive:   params.bool(ParamKey::Recursive)?.unwrap_or(true),
        })
    }

    fn at(&self, search_path: String) -> Self {
        Self {
            search_path,
            ..self.clone()
        }
    }

    fn accepts(&self, path: &str) -> bool {
        !path.is_empty()
            && self.asset_type.matches(path)
            && (self.search_term.is_empty()
                || path
                    .to_lowercase()
                    .contains(&self.search_term.to_lowercase()))
    }

    /// Keep matching paths in order, stopping at the cap
    fn filter(&self, paths: Vec<String>) -> Vec<String> {
        paths
            .into_iter()
            .filter(|path| self.accepts(path))
            .take(self.max_results)
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct AssetListing<'a> {
    asset_type:  &'static str,
    search_path: &'a str,
    search_term: &'a str,
    total_found: usize,
    assets:      Vec<String>,
}

impl<'a> AssetListing<'a> {
    fn new(query: &'a AssetQuery, assets: Vec<String>) -> Self {
        Self {
            asset_type: query.asset_type.display_name(),
            search_path: &query.search_path,
            search_term: &query.search_term,
            total_found: assets.len(),
            assets,
        }
    }
}

/// Raw listing under the query path, falling back to `GetAssetsByPath` once
async fn fetch_paths(session: &Session<'_>, query: &AssetQuery) -> Result<Vec<String>> {
    let primary = session
        .call(
            EDITOR_ASSET_LIBRARY,
            FN_LIST_ASSETS,
            json!({
                "DirectoryPath": query.search_path,
                "Recursive": query.recursive,
                "IncludeFolder": true,
            }),
        )
        .await;

    let primary_error = match primary {
        Ok(response) => return Ok(response.return_strings()),
        Err(report) if report.current_context().invalidates_connection() => return Err(report),
        Err(report) => report,
    };
    warn!(
        "{FN_LIST_ASSETS} under {} failed, trying {FN_GET_ASSETS_BY_PATH}: {primary_error:?}",
        query.search_path
    );

    match session
        .call(
            EDITOR_ASSET_LIBRARY,
            FN_GET_ASSETS_BY_PATH,
            json!({
                "DirectoryPath": query.search_path,
                "Recursive": query.recursive,
                "IncludeFolder": true,
            }),
        )
        .await
    {
        Ok(response) => Ok(response.return_strings()),
        Err(fallback_error) => Err(Report::new(Error::failed_to(
            "list assets",
            format!(
                "{}. Alternative approach also failed: {}",
                primary_error.current_context(),
                fallback_error.current_context()
            ),
        ))),
    }
}

async fn filtered(session: &Session<'_>, query: &AssetQuery) -> Result<Vec<String>> {
    let paths = fetch_paths(session, query).await?;
    info!("Found {} total assets in {}", paths.len(), query.search_path);
    Ok(query.filter(paths))
}

/// List assets under one path, filtered by type and search term
pub async fn list_available_assets(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<ToolOutput> {
    let query = AssetQuery::from_params(params, ParamKey::SearchPath, DEFAULT_LIST_MAX_RESULTS)?;
    let session = manager.connect().await?;
    let assets = filtered(&session, &query).await?;
    ToolOutput::report(&AssetListing::new(&query, assets))
}

/// Run the listing over the base path and each conventional subdirectory
///
/// Results are concatenated in subdirectory order, de-duplicated keeping the first
/// occurrence, then capped. A failing subdirectory is logged and skipped unless the
/// connection itself was lost.
pub async fn search_assets_recursively(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<ToolOutput> {
    let query = AssetQuery::from_params(params, ParamKey::BasePath, DEFAULT_RECURSIVE_MAX_RESULTS)?;
    let session = manager.connect().await?;

    let mut found = Vec::new();
    for subdir in COMMON_ASSET_SUBDIRS {
        let sub_query = query.at(format!("{}{subdir}", query.search_path));
        match filtered(&session, &sub_query).await {
            Ok(assets) => {
                info!("Found {} assets in {}", assets.len(), sub_query.search_path);
                found.extend(assets);
            },
            Err(report) if session.is_poisoned() => return Err(report),
            Err(report) => {
                warn!("Error searching in {}: {report:?}", sub_query.search_path);
            },
        }
    }

    let assets = found
        .into_iter()
        .unique()
        .take(query.max_results)
        .collect();
    ToolOutput::report(&AssetListing::new(&query, assets))
}
