//! A [`Communicator`] made of real OS processes.
//!
//! The coordinator launches `size - 1` copies of a program, each told its
//! rank through the environment. A worker process loads its own copy of the
//! input and runs its share. It then writes its hit count to stdout as one
//! decimal line and exits. The coordinator's reduction waits for every child
//! and sums the reported values with its own.

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use crate::error::{Error, Result};
use crate::execution::distributed::{Communicator, ROOT_RANK};

/// Environment variable carrying a worker process's rank.
pub const RANK_ENV: &str = "CIRCLE_AREA_RANK";
/// Environment variable carrying the number of processes in the group.
pub const WORLD_SIZE_ENV: &str = "CIRCLE_AREA_WORLD_SIZE";

/// One process's view of a multi-process group.
#[derive(Debug)]
pub enum ProcessGroup {
    /// Rank 0, holding the children it launched (ranks `1..size`).
    Coordinator { size: usize, children: Vec<Child> },
    /// A launched child with rank `1..size`.
    Worker { rank: usize, size: usize },
}

impl ProcessGroup {
    /// Launches `size - 1` worker processes running `program args..`.
    ///
    /// The children inherit stderr, and their stdout is captured for the
    /// reduction. If any launch fails, the children already started are
    /// killed.
    pub fn launch<I, S>(program: &Path, args: I, size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        if size < 1 {
            return Err(Error::InvalidWorkerCount {
                workers: size,
                samples: 0,
            });
        }

        let args: Vec<S> = args.into_iter().collect();
        let mut children = Vec::with_capacity(size - 1);
        for rank in 1..size {
            let spawned = Command::new(program)
                .args(&args)
                .env(RANK_ENV, rank.to_string())
                .env(WORLD_SIZE_ENV, size.to_string())
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .spawn();
            match spawned {
                Ok(child) => children.push(child),
                Err(e) => {
                    kill_all(&mut children);
                    return Err(Error::worker(
                        rank,
                        format!("cannot launch {}: {e}", program.display()),
                    ));
                }
            }
        }

        log::debug!("launched {} worker processes", children.len());
        Ok(ProcessGroup::Coordinator { size, children })
    }

    /// Detects whether this process was launched as a worker.
    ///
    /// Returns `Ok(None)` when no rank is set in the environment.
    pub fn from_env() -> Result<Option<Self>> {
        let rank = match std::env::var(RANK_ENV) {
            Ok(rank) => rank,
            Err(_) => return Ok(None),
        };
        let size = std::env::var(WORLD_SIZE_ENV).unwrap_or_default();

        let parsed = rank.trim().parse::<usize>().ok().zip(size.trim().parse::<usize>().ok());
        match parsed {
            Some((rank, size)) if rank != ROOT_RANK && rank < size => {
                Ok(Some(ProcessGroup::Worker { rank, size }))
            }
            _ => Err(Error::worker(
                ROOT_RANK,
                format!("invalid worker environment {RANK_ENV}={rank:?} {WORLD_SIZE_ENV}={size:?}"),
            )),
        }
    }
}

impl Communicator for ProcessGroup {
    fn rank(&self) -> usize {
        match self {
            ProcessGroup::Coordinator { .. } => ROOT_RANK,
            ProcessGroup::Worker { rank, .. } => *rank,
        }
    }

    fn size(&self) -> usize {
        match self {
            ProcessGroup::Coordinator { size, .. } | ProcessGroup::Worker { size, .. } => *size,
        }
    }

    fn reduce_sum(&mut self, local: u64) -> Result<Option<u64>> {
        match self {
            ProcessGroup::Worker { .. } => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{local}")?;
                out.flush()?;
                Ok(None)
            }
            ProcessGroup::Coordinator { size, children } => {
                if children.len() + 1 != *size {
                    return Err(Error::worker(ROOT_RANK, "process group was already reduced"));
                }

                let mut total = local;
                let mut pending = std::mem::take(children).into_iter().enumerate();
                while let Some((index, child)) = pending.next() {
                    let rank = index + 1;
                    match collect(rank, child) {
                        Ok(value) => total += value,
                        Err(err) => {
                            let mut rest: Vec<Child> = pending.map(|(_, child)| child).collect();
                            kill_all(&mut rest);
                            return Err(err);
                        }
                    }
                }
                Ok(Some(total))
            }
        }
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        if let ProcessGroup::Coordinator { children, .. } = self {
            kill_all(children);
        }
    }
}

/// Waits for a child and parses its reported hit count.
fn collect(rank: usize, child: Child) -> Result<u64> {
    let output = child
        .wait_with_output()
        .map_err(|e| Error::worker(rank, format!("cannot wait for process: {e}")))?;
    if !output.status.success() {
        return Err(Error::worker(rank, format!("process exited with {}", output.status)));
    }

    let reply = String::from_utf8_lossy(&output.stdout);
    reply
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::worker(rank, format!("unexpected reply {:?}", reply.trim())))
}

fn kill_all(children: &mut Vec<Child>) {
    for mut child in children.drain(..) {
        let _ = child.kill();
        let _ = child.wait();
    }
}
