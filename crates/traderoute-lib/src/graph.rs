use std::collections::HashMap;

use tracing::debug;

use crate::config::{RouteType, TravelConfig};
use crate::error::{Error, Result};
use crate::records::TradeNetwork;
use crate::terrain::TerrainSpeedTable;

/// Numeric identifier for a region (the provider's `region_num`).
pub type RegionId = i64;

/// Adjacency entry of a region.
///
/// `index` points into the owning graph's region table; regions never hold
/// references to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub region: RegionId,
    pub weight: f64,
    pub(crate) index: usize,
}

/// Vertex of the route graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: RegionId,
    pub(crate) distance: f64,
    pub(crate) visited: bool,
    pub(crate) previous: Option<RegionId>,
    adjacent: Vec<Neighbour>,
}

impl Region {
    fn new(id: RegionId) -> Self {
        Self {
            id,
            distance: f64::INFINITY,
            visited: false,
            previous: None,
            adjacent: Vec::new(),
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Best-known travel time from the source of the last run.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Predecessor on the shortest-path tree of the last run.
    pub fn previous(&self) -> Option<RegionId> {
        self.previous
    }

    pub fn neighbours(&self) -> &[Neighbour] {
        &self.adjacent
    }

    /// `true` once a run has assigned a finite distance.
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }

    /// Travel-time weight of the edge to `other`, if one exists.
    pub fn weight_to(&self, other: RegionId) -> Option<f64> {
        self.adjacent
            .iter()
            .find(|neighbour| neighbour.region == other)
            .map(|neighbour| neighbour.weight)
    }

    fn reset(&mut self) {
        self.distance = f64::INFINITY;
        self.visited = false;
        self.previous = None;
    }

    fn upsert_neighbour(&mut self, neighbour: Neighbour) {
        match self
            .adjacent
            .iter_mut()
            .find(|existing| existing.index == neighbour.index)
        {
            Some(existing) => *existing = neighbour,
            None => self.adjacent.push(neighbour),
        }
    }
}

/// Undirected, travel-time weighted graph of regions.
///
/// The graph owns every [`Region`]. Regions are kept in insertion order, which
/// is the iteration order exposed by [`RouteGraph::regions`].
#[derive(Debug, Clone)]
pub struct RouteGraph {
    regions: Vec<Region>,
    index: HashMap<RegionId, usize>,
    terrain: TerrainSpeedTable,
    config: TravelConfig,
}

impl RouteGraph {
    /// Create an empty graph that derives edge weights from `terrain` and
    /// `config`.
    pub fn new(terrain: TerrainSpeedTable, config: TravelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            regions: Vec::new(),
            index: HashMap::new(),
            terrain,
            config,
        })
    }

    /// Return the region for `id`, creating it when absent.
    pub fn add_region(&mut self, id: RegionId) -> &Region {
        let index = self.ensure_region(id);
        &self.regions[index]
    }

    /// Insert an undirected trade route.
    ///
    /// Both endpoints are created on demand. The weight is the travel time
    /// `distance / (base_speed(route_type) * terrain_speed)`. Adding the same
    /// pair again replaces the earlier weight in both directions (last write
    /// wins); parallel routes are not merged.
    pub fn add_edge(
        &mut self,
        origin: RegionId,
        destination: RegionId,
        distance: f64,
        route_type: RouteType,
        terrain: &str,
    ) -> Result<()> {
        let terrain_speed = self
            .terrain
            .speed(terrain)
            .ok_or_else(|| Error::UnknownTerrain {
                terrain: terrain.to_string(),
                origin,
                destination,
            })?;
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(Error::InvalidDistance {
                origin,
                destination,
                distance,
            });
        }

        let speed = self.config.base_speed(route_type) * terrain_speed;
        let weight = distance / speed;

        let origin_index = self.ensure_region(origin);
        let destination_index = self.ensure_region(destination);

        self.regions[origin_index].upsert_neighbour(Neighbour {
            region: destination,
            weight,
            index: destination_index,
        });
        self.regions[destination_index].upsert_neighbour(Neighbour {
            region: origin,
            weight,
            index: origin_index,
        });
        Ok(())
    }

    /// Lookup a region without creating it.
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.index.get(&id).map(|&index| &self.regions[index])
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.index.contains_key(&id)
    }

    /// All regions in insertion order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter()
    }

    /// Neighbours of `id`, or an empty slice for unknown regions.
    pub fn neighbours(&self, id: RegionId) -> &[Neighbour] {
        self.region(id).map(Region::neighbours).unwrap_or(&[])
    }

    /// Weight of the edge between `from` and `to`, if both exist and are
    /// adjacent.
    pub fn weight(&self, from: RegionId, to: RegionId) -> Option<f64> {
        self.region(from).and_then(|region| region.weight_to(to))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of distinct undirected trade routes.
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.regions.iter().map(|r| r.adjacent.len()).sum();
        let loops = self
            .regions
            .iter()
            .filter(|r| r.weight_to(r.id).is_some())
            .count();
        (directed - loops) / 2 + loops
    }

    pub fn terrain(&self) -> &TerrainSpeedTable {
        &self.terrain
    }

    pub fn config(&self) -> &TravelConfig {
        &self.config
    }

    /// Restore distance, visited and previous on every region.
    pub fn reset_traversal(&mut self) {
        for region in &mut self.regions {
            region.reset();
        }
    }

    pub(crate) fn index_of(&self, id: RegionId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn region_at(&self, index: usize) -> &Region {
        &self.regions[index]
    }

    pub(crate) fn region_at_mut(&mut self, index: usize) -> &mut Region {
        &mut self.regions[index]
    }

    fn ensure_region(&mut self, id: RegionId) -> usize {
        if let Some(&index) = self.index.get(&id) {
            return index;
        }
        let index = self.regions.len();
        self.regions.push(Region::new(id));
        self.index.insert(id, index);
        index
    }
}

/// Build a route graph from the provider's record streams.
///
/// Region records are added first so standalone regions exist even without
/// trade routes. Any data-shape error (unknown terrain, unknown route type,
/// bad distance or speed) aborts construction.
pub fn build_graph(network: &TradeNetwork, config: &TravelConfig) -> Result<RouteGraph> {
    let terrain = TerrainSpeedTable::from_records(&network.terrain)?;
    let mut graph = RouteGraph::new(terrain, *config)?;

    for region in &network.regions {
        graph.add_region(region.region_num);
    }

    for route in &network.trade_routes {
        let route_type = route.route_type.parse::<RouteType>()?;
        graph.add_edge(
            route.origin,
            route.destination,
            route.distance,
            route_type,
            &route.terrain_type,
        )?;
    }

    debug!(
        regions = graph.len(),
        trade_routes = graph.edge_count(),
        terrain = graph.terrain.len(),
        "built route graph"
    );
    Ok(graph)
}
