use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::algorithm::{dijkstra::Dijkstra, ShortestPathAlgorithm};
use crate::config::PathwayConfig;
use crate::graph::{NodeId, WeightedReactionGraph};
use crate::pathways::progress::{CancellationToken, NoProgress, ProgressObserver};
use crate::pathways::results::{PathRecord, PathResultSet};
use crate::{Error, Result};

type Weight = OrderedFloat<f64>;

/// Pathways found from one source species
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePathways {
    pub source: NodeId,
    pub paths: Vec<PathRecord>,
}

/// All-pairs driver: one single-source search per species, restricted to
/// species targets
#[derive(Debug, Clone)]
pub struct PathwayFinder<A = Dijkstra> {
    algorithm: A,
    parallel: bool,
    threads: Option<usize>,
    cancellation: CancellationToken,
}

impl PathwayFinder<Dijkstra> {
    pub fn new() -> Self {
        PathwayFinder {
            algorithm: Dijkstra::new(),
            parallel: true,
            threads: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn from_config(config: &PathwayConfig) -> Self {
        PathwayFinder::new()
            .with_parallel(config.parallel)
            .with_threads(config.threads)
    }
}

impl Default for PathwayFinder<Dijkstra> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> PathwayFinder<A>
where
    A: ShortestPathAlgorithm<Weight, WeightedReactionGraph> + Sync,
{
    /// Swap the single-source algorithm
    pub fn with_algorithm<B>(self, algorithm: B) -> PathwayFinder<B> {
        PathwayFinder {
            algorithm,
            parallel: self.parallel,
            threads: self.threads,
            cancellation: self.cancellation,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run on a dedicated pool of `threads` workers instead of the global one
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Shortest pathways from `source` to every other reachable species
    pub fn paths_from(&self, graph: &WeightedReactionGraph, source: usize) -> Result<Vec<PathRecord>> {
        let source_node = graph.node(source).ok_or(Error::SourceNotFound)?;
        if !source_node.is_species() {
            return Err(Error::SourceNotFound);
        }

        let result = self.algorithm.compute_shortest_paths(graph, source)?;
        let mut paths = Vec::new();

        for &target in graph.species() {
            if target == source {
                continue;
            }
            let distance = match result.distances[target] {
                Some(distance) => distance,
                None => continue,
            };

            let vertices =
                <A as ShortestPathAlgorithm<Weight, WeightedReactionGraph>>::get_path(&self.algorithm, &result, target)
                    .ok_or(Error::InvalidVertex(target))?;
            let path = vertices
                .iter()
                .map(|&vertex| graph.node(vertex).cloned().ok_or(Error::InvalidVertex(vertex)))
                .collect::<Result<Vec<_>>>()?;

            paths.push(PathRecord {
                source: source_node.clone(),
                target: path[path.len() - 1].clone(),
                path,
                timescale: distance.into_inner(),
            });
        }

        Ok(paths)
    }

    /// Lazily searches species sources one at a time, in graph order.
    /// Stops yielding once the cancellation token is set.
    pub fn iter_sources<'g>(
        &'g self,
        graph: &'g WeightedReactionGraph,
    ) -> impl Iterator<Item = Result<SourcePathways>> + 'g {
        graph
            .species()
            .iter()
            .take_while(move |_| !self.cancellation.is_cancelled())
            .map(move |&source| -> Result<SourcePathways> {
                let paths = self.paths_from(graph, source)?;
                Ok(SourcePathways {
                    source: graph.node(source).cloned().ok_or(Error::SourceNotFound)?,
                    paths,
                })
            })
    }

    /// Every species-to-species pathway in `graph`
    pub fn find_all(&self, graph: &WeightedReactionGraph) -> Result<PathResultSet> {
        self.find_all_with_progress(graph, &NoProgress)
    }

    /// Like [`find_all`](Self::find_all), notifying `observer` after each source
    pub fn find_all_with_progress(
        &self,
        graph: &WeightedReactionGraph,
        observer: &dyn ProgressObserver,
    ) -> Result<PathResultSet> {
        let start = Instant::now();
        let total = graph.species().len();
        info!(
            "Searching pathways from {} species using {} ({})",
            total,
            <A as ShortestPathAlgorithm<Weight, WeightedReactionGraph>>::name(&self.algorithm),
            if self.parallel { "parallel" } else { "sequential" }
        );

        let per_source = match (self.parallel, self.threads) {
            (true, Some(threads)) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| Error::Config(e.to_string()))?;
                pool.install(|| self.search_parallel(graph, observer))?
            }
            (true, None) => self.search_parallel(graph, observer)?,
            (false, _) => self.search_sequential(graph, observer)?,
        };

        let completed = per_source.iter().filter(|paths| paths.is_some()).count();
        if completed < total {
            warn!("Pathway search cancelled after {} of {} sources", completed, total);
            return Err(Error::Cancelled { completed, total });
        }

        let records: Vec<PathRecord> = per_source.into_iter().flatten().flatten().collect();
        info!("Found {} pathways in {:?}", records.len(), start.elapsed());

        Ok(PathResultSet::from_records(records))
    }

    fn search_parallel(
        &self,
        graph: &WeightedReactionGraph,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<Option<Vec<PathRecord>>>> {
        let total = graph.species().len();
        let completed = AtomicUsize::new(0);

        graph
            .species()
            .par_iter()
            .map(|&source| -> Result<Option<Vec<PathRecord>>> {
                if self.cancellation.is_cancelled() {
                    return Ok(None);
                }
                let paths = self.paths_from(graph, source)?;
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                notify(observer, done, total, paths.len());
                Ok(Some(paths))
            })
            .collect()
    }

    fn search_sequential(
        &self,
        graph: &WeightedReactionGraph,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<Option<Vec<PathRecord>>>> {
        let total = graph.species().len();
        let mut per_source = Vec::with_capacity(total);

        for &source in graph.species() {
            if self.cancellation.is_cancelled() {
                per_source.push(None);
                continue;
            }
            let paths = self.paths_from(graph, source)?;
            notify(observer, per_source.len() + 1, total, paths.len());
            per_source.push(Some(paths));
        }

        Ok(per_source)
    }
}

fn notify(observer: &dyn ProgressObserver, completed: usize, total: usize, paths: usize) {
    if let Err(e) = observer.source_completed(completed, total, paths) {
        warn!("Progress observer failed: {}", e);
    }
    debug!("Source {}/{} done with {} pathways", completed, total, paths);
}
