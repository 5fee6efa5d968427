//! The compute grid every pipeline stage is launched on.
//!
//! A stage is a kernel invoked once per element (vertex, triangle or pixel). Work is
//! handed out to the pool threads in small chunks claimed on demand, so threads that
//! finish early steal the remaining work. A launch returns only after every element
//! has been processed, which is the barrier between stages.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use scoped_threadpool::Pool;

/// Number of elements claimed by a thread at a time
pub const DEFAULT_CHUNK_SIZE: usize = 64;

pub struct Grid {
    pool: Pool,
    chunk_size: usize,
}

impl Grid {
    /// Creates a grid with the given number of worker threads.
    pub fn new(threads: usize, chunk_size: usize) -> Grid {
        Grid {
            pool: Pool::new(threads.max(1) as u32),
            chunk_size: chunk_size.max(1),
        }
    }

    #[inline]
    pub fn thread_count(&self) -> usize {
        self.pool.thread_count() as usize
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Runs `kernel` once for every index in `0..len`.
    ///
    /// Indices are processed in no particular order, so kernels may only share state
    /// through synchronized or atomic memory.
    pub fn launch<F>(&mut self, len: usize, kernel: F) where F: Fn(usize) + Sync {
        if len == 0 {
            return;
        }

        let Grid { ref mut pool, chunk_size } = *self;

        let workers = pool.thread_count();
        let index = AtomicUsize::new(0);

        let kernel = &kernel;
        let index = &index;

        pool.scoped(|scope| {
            for _ in 0..workers {
                scope.execute(move || {
                    loop {
                        let mut i = index.fetch_add(chunk_size, Ordering::Relaxed);

                        if i >= len {
                            break;
                        }

                        let max = (i + chunk_size).min(len);

                        while i < max {
                            kernel(i);
                            i += 1;
                        }
                    }
                });
            }
        });
    }

    /// Runs `kernel` once for every element of `output`, giving it exclusive access
    /// to that element along with its index.
    pub fn map<T, F>(&mut self, output: &mut [T], kernel: F) where T: Send,
                                                                 F: Fn(usize, &mut T) + Sync {
        if output.is_empty() {
            return;
        }

        let Grid { ref mut pool, chunk_size } = *self;

        let workers = pool.thread_count();
        let chunks = Mutex::new(output.chunks_mut(chunk_size).enumerate());

        let kernel = &kernel;
        let chunks = &chunks;

        pool.scoped(|scope| {
            for _ in 0..workers {
                scope.execute(move || {
                    loop {
                        let next = chunks.lock().next();

                        let (chunk, elements) = match next {
                            Some(next) => next,
                            None => break,
                        };

                        let base = chunk * chunk_size;

                        for (offset, element) in elements.iter_mut().enumerate() {
                            kernel(base + offset, element);
                        }
                    }
                });
            }
        });
    }
}
