// This module provides arena-based compilation session management using the bumpalo
// crate to simplify lifetime management. CompileSession is the anchor for one compile
// call: it holds the arena every transient object (instruction storage, finalized
// stream) is allocated from, and gathers emission statistics while the sequencer
// runs. All objects share the session lifetime and are released together when the
// call frame that created the arena returns, on every exit path including errors.
// EmissionStats tracks the per-mnemonic instruction breakdown and program size for
// the debug dump; hashbrown provides the counting map.

//! Arena-based compilation session management.
//!
//! Each call into the compiler constructs its own session over a fresh
//! [`bumpalo::Bump`], so distinct compilations share no mutable state and the
//! transient profile and instruction buffer cannot outlive the call.

use std::cell::RefCell;
use std::fmt;

use bumpalo::Bump;
use hashbrown::HashMap;

/// Arena anchor and statistics for a single compilation.
pub struct CompileSession<'arena> {
    /// Arena allocator for compilation objects.
    arena: &'arena Bump,

    /// Emission statistics for debugging.
    stats: RefCell<EmissionStats>,
}

impl<'arena> CompileSession<'arena> {
    /// Create a new session over the given arena.
    pub fn new(arena: &'arena Bump) -> Self {
        Self {
            arena,
            stats: RefCell::new(EmissionStats::default()),
        }
    }

    /// Get access to the arena allocator.
    pub fn arena(&self) -> &'arena Bump {
        self.arena
    }

    /// Record one emitted instruction.
    pub fn record_instruction(&self, mnemonic: &'static str) {
        let mut stats = self.stats.borrow_mut();
        stats.instructions_emitted += 1;
        *stats.instruction_counts.entry(mnemonic).or_insert(0) += 1;
    }

    /// Record the size of the extracted program.
    pub fn record_program_extracted(&self, bytes: usize) {
        self.stats.borrow_mut().program_bytes = bytes;
    }

    /// Get a snapshot of the emission statistics.
    pub fn stats(&self) -> EmissionStats {
        self.stats.borrow().clone()
    }
}

/// Emission statistics for one compilation.
#[derive(Debug, Default, Clone)]
pub struct EmissionStats {
    /// Number of instructions emitted.
    pub instructions_emitted: usize,

    /// Count of each mnemonic emitted.
    pub instruction_counts: HashMap<&'static str, usize>,

    /// Size of the extracted program in bytes.
    pub program_bytes: usize,
}

impl fmt::Display for EmissionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Emission statistics:")?;
        writeln!(f, "  Instructions emitted: {}", self.instructions_emitted)?;
        writeln!(f, "  Program size: {} bytes", self.program_bytes)?;

        if !self.instruction_counts.is_empty() {
            writeln!(f, "  Instruction breakdown:")?;
            let mut sorted: Vec<_> = self.instruction_counts.iter().collect();
            sorted.sort_by_key(|(mnemonic, _)| *mnemonic);

            for (mnemonic, count) in sorted {
                writeln!(f, "    {}: {}", mnemonic, count)?;
            }
        }

        Ok(())
    }
}
