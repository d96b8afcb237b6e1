use std::collections::HashSet;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::RegionId;
use crate::records::{RegionRecord, TerrainRecord, TradeNetwork, TradeRouteRecord};

const TERRAIN_TABLE: &str = "terrain";
const REGIONS_TABLE: &str = "regions";
const TRADE_ROUTES_TABLE: &str = "trade_routes";

const TERRAIN_COLUMNS: [&str; 2] = ["terrain", "travel_speed"];
const REGION_ID_COLUMN: &str = "region_num";
const REGION_NAME_COLUMN: &str = "name";
const TRADE_ROUTE_COLUMNS: [&str; 5] = [
    "origin",
    "destination",
    "distance",
    "route_type",
    "terrain_type",
];

/// Load terrain, regions and trade routes from a SQLite dataset.
///
/// The dataset must provide `terrain(terrain, travel_speed)`,
/// `regions(region_num)` and
/// `trade_routes(origin, destination, distance, route_type, terrain_type)`.
/// A `regions.name` column is picked up when present. Other columns
/// (prosperity, commodities, ...) are ignored.
pub fn load_trade_network(db_path: &Path) -> Result<TradeNetwork> {
    if !db_path.exists() {
        return Err(Error::DatasetNotFound {
            path: db_path.to_path_buf(),
        });
    }

    let connection = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let has_region_names = detect_schema(&connection)?;
    debug!(path = %db_path.display(), has_region_names, "loading trade network");

    let terrain = load_terrain(&connection)?;
    let regions = load_regions(&connection, has_region_names)?;
    let trade_routes = load_trade_routes(&connection)?;

    let known: HashSet<RegionId> = regions.iter().map(|region| region.region_num).collect();
    let implicit_endpoints = trade_routes
        .iter()
        .filter(|route| !known.contains(&route.origin) || !known.contains(&route.destination))
        .count();
    if implicit_endpoints > 0 {
        warn!(
            implicit_endpoints,
            "trade routes reference regions missing from the regions table; they will be created on demand"
        );
    }

    debug!(
        terrain = terrain.len(),
        regions = regions.len(),
        trade_routes = trade_routes.len(),
        "loaded trade network"
    );

    Ok(TradeNetwork {
        terrain,
        regions,
        trade_routes,
    })
}

/// Verify the required tables exist. Returns whether regions carry names.
fn detect_schema(connection: &Connection) -> Result<bool> {
    for table in [TERRAIN_TABLE, REGIONS_TABLE, TRADE_ROUTES_TABLE] {
        if !table_exists(connection, table)? {
            return Err(Error::UnsupportedSchema);
        }
    }

    if !table_has_columns(connection, TERRAIN_TABLE, &TERRAIN_COLUMNS)?
        || !table_has_columns(connection, REGIONS_TABLE, &[REGION_ID_COLUMN])?
        || !table_has_columns(connection, TRADE_ROUTES_TABLE, &TRADE_ROUTE_COLUMNS)?
    {
        return Err(Error::UnsupportedSchema);
    }

    table_has_columns(connection, REGIONS_TABLE, &[REGION_NAME_COLUMN])
}

fn load_terrain(connection: &Connection) -> Result<Vec<TerrainRecord>> {
    let sql = format!(
        "SELECT {terrain}, {speed} FROM {table}",
        terrain = TERRAIN_COLUMNS[0],
        speed = TERRAIN_COLUMNS[1],
        table = TERRAIN_TABLE
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(TerrainRecord {
            terrain: row.get(0)?,
            travel_speed: row.get(1)?,
        })
    })?;

    let mut terrain = Vec::new();
    for row in rows {
        terrain.push(row?);
    }
    Ok(terrain)
}

fn load_regions(connection: &Connection, has_names: bool) -> Result<Vec<RegionRecord>> {
    let name_select = if has_names {
        REGION_NAME_COLUMN
    } else {
        "NULL"
    };
    let sql = format!(
        "SELECT {id}, {name} FROM {table} ORDER BY {id}",
        id = REGION_ID_COLUMN,
        name = name_select,
        table = REGIONS_TABLE
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(RegionRecord {
            region_num: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut regions = Vec::new();
    for row in rows {
        regions.push(row?);
    }
    Ok(regions)
}

fn load_trade_routes(connection: &Connection) -> Result<Vec<TradeRouteRecord>> {
    let sql = format!(
        "SELECT {columns} FROM {table}",
        columns = TRADE_ROUTE_COLUMNS.join(", "),
        table = TRADE_ROUTES_TABLE
    );
    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_trade_route)?;

    let mut routes = Vec::new();
    for row in rows {
        routes.push(row?);
    }
    Ok(routes)
}

fn row_to_trade_route(row: &Row<'_>) -> rusqlite::Result<TradeRouteRecord> {
    Ok(TradeRouteRecord {
        origin: row.get(0)?,
        destination: row.get(1)?,
        distance: row.get(2)?,
        route_type: row.get(3)?,
        terrain_type: row.get(4)?,
    })
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
