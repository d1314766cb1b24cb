//! Distributed-memory execution.
//!
//! Each participant (rank) owns a full copy of the domain, runs exactly one
//! job, and contributes its hit count to a single blocking collective sum
//! delivered to rank 0. Only the hit count travels. Rank 0 recomputes the
//! number of samples drawn as `per-rank share * size`, which is exact because
//! every rank gets the same share.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::{Error, Result};
use crate::execution::Strategy;
use crate::geometry::Domain;
use crate::monte_carlo::{AggregateResult, SampleJob, SeedSource};

/// Rank 0 is the coordinator of every group.
pub const ROOT_RANK: usize = 0;

/// A fixed group of participants that can sum a value at the root.
pub trait Communicator {
    /// This participant's rank, in `0..size()`.
    fn rank(&self) -> usize;

    /// Number of participants in the group.
    fn size(&self) -> usize;

    /// Blocking collective sum of `local` over every rank.
    ///
    /// Every rank must call this exactly once. The root receives
    /// `Some(total)` and every other rank receives `None`.
    fn reduce_sum(&mut self, local: u64) -> Result<Option<u64>>;

    fn is_root(&self) -> bool {
        self.rank() == ROOT_RANK
    }
}

/// SPMD strategy: this participant runs the job matching its rank.
#[derive(Debug)]
pub struct Distributed<C> {
    comm: C,
    seed: SeedSource,
}

impl<C: Communicator> Distributed<C> {
    pub fn new(comm: C, seed: SeedSource) -> Self {
        Self { comm, seed }
    }
}

impl<C: Communicator> Strategy for Distributed<C> {
    fn name(&self) -> &'static str {
        "distributed"
    }

    fn workers(&self) -> usize {
        self.comm.size()
    }

    fn execute(
        &mut self,
        domain: &Domain,
        jobs: Vec<SampleJob>,
    ) -> Result<Option<AggregateResult>> {
        let rank = self.comm.rank();
        let job = jobs.get(rank).copied().ok_or_else(|| {
            Error::worker(rank, format!("no job for rank {rank} of {}", jobs.len()))
        })?;

        let local = self.seed.sampler(job.worker).run(&job, domain);
        let inside = self.comm.reduce_sum(local.samples_inside)?;

        let drawn = job.sample_count * self.comm.size() as u64;
        Ok(inside.map(|inside| AggregateResult::new(drawn, inside)))
    }
}

/// In-process group whose ranks are connected by channels.
///
/// Each endpoint is meant to be moved onto its own thread.
pub struct LocalGroup;

impl LocalGroup {
    /// Creates `size` connected endpoints, ordered by rank.
    pub fn new(size: usize) -> Vec<LocalEndpoint> {
        let (tx, rx) = mpsc::channel();
        let mut endpoints = Vec::with_capacity(size);
        if size == 0 {
            return endpoints;
        }
        endpoints.push(LocalEndpoint {
            rank: ROOT_RANK,
            size,
            link: Link::Root(rx),
        });
        endpoints.extend((1..size).map(|rank| LocalEndpoint {
            rank,
            size,
            link: Link::Peer(tx.clone()),
        }));
        endpoints
    }
}

#[derive(Debug)]
enum Link {
    Root(Receiver<(usize, u64)>),
    Peer(Sender<(usize, u64)>),
}

/// One rank of a [`LocalGroup`].
#[derive(Debug)]
pub struct LocalEndpoint {
    rank: usize,
    size: usize,
    link: Link,
}

impl Communicator for LocalEndpoint {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn reduce_sum(&mut self, local: u64) -> Result<Option<u64>> {
        match &self.link {
            Link::Root(rx) => {
                let mut total = local;
                let mut reported = vec![false; self.size];
                reported[ROOT_RANK] = true;
                for _ in 1..self.size {
                    let (rank, value) = rx.recv().map_err(|_| {
                        let missing = reported.iter().position(|done| !done).unwrap_or(ROOT_RANK);
                        Error::worker(missing, "rank left the group before the reduction")
                    })?;
                    reported[rank] = true;
                    total += value;
                }
                Ok(Some(total))
            }
            Link::Peer(tx) => {
                tx.send((self.rank, local)).map_err(|_| {
                    Error::worker(ROOT_RANK, "root left the group before the reduction")
                })?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_local_group_ranks() {
        let group = LocalGroup::new(3);
        let ranks: Vec<usize> = group.iter().map(|e| e.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
        assert!(group[0].is_root());
        assert!(!group[2].is_root());
        assert!(group.iter().all(|e| e.size() == 3));
        assert!(LocalGroup::new(0).is_empty());
    }

    #[test]
    fn test_local_group_sums_at_root() {
        let results: Vec<Option<u64>> = thread::scope(|scope| {
            let handles: Vec<_> = LocalGroup::new(4)
                .into_iter()
                .map(|mut endpoint| {
                    scope.spawn(move || {
                        let value = 10 * (endpoint.rank() as u64 + 1);
                        endpoint.reduce_sum(value).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results, vec![Some(100), None, None, None]);
    }

    #[test]
    fn test_local_group_of_one() {
        let mut group = LocalGroup::new(1);
        assert_eq!(group[0].reduce_sum(5).unwrap(), Some(5));
    }

    #[test]
    fn test_missing_rank_is_worker_failure() {
        let mut group = LocalGroup::new(3);
        let mut root = group.remove(0);
        let mut first = group.remove(0);
        first.reduce_sum(1).unwrap();
        drop(group);
        drop(first);
        assert!(matches!(
            root.reduce_sum(0),
            Err(Error::WorkerFailure { worker: 2, .. })
        ));
    }

    #[test]
    fn test_missing_root_is_worker_failure() {
        let mut group = LocalGroup::new(2);
        let mut peer = group.pop().unwrap();
        drop(group);
        assert!(matches!(
            peer.reduce_sum(1),
            Err(Error::WorkerFailure { worker: 0, .. })
        ));
    }
}
