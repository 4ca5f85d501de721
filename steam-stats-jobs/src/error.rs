use steam_stats_db::StoreError;
use steam_stats_giantbomb::CatalogError;
use steam_stats_steam::SteamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Steam(#[from] SteamError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
