//! Raw stack capture.

use once_cell::sync::OnceCell;
use smallvec::SmallVec;
use tracing::{trace, warn};

use super::Frame;
use crate::{config, symbols};

/// Extra frames read past the requested depth to cover the unwinder's own frames
/// above the capture point.
const UNWINDER_FRAME_ALLOWANCE: usize = 16;

/// Upper bound on the distance between the start of [`walk`] and a return address
/// inside it, used when the platform cannot report enclosing function addresses.
const WALK_BODY_BOUND: usize = 4096;

type Ips = SmallVec<[usize; 32]>;

static MISSING_DEBUG_INFO: OnceCell<()> = OnceCell::new();

/// Instruction pointers of a captured call stack, innermost first.
///
/// Capturing only records addresses. Symbol resolution happens in [`RawStack::frames`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStack
{
    ips: Ips,
}

impl RawStack
{
    /// Capture the current thread's stack with the configured maximum depth.
    ///
    /// `skip = 0` starts at the function calling `capture`, `1` at its caller, and so on.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self
    {
        Self::capture_with_depth(skip + 1, config::current().max_stack_depth)
    }

    /// Capture at most `max_depth` frames, ignoring the process-wide configuration.
    #[inline(never)]
    pub fn capture_with_depth(skip: usize, max_depth: usize) -> Self
    {
        Self {
            ips: walk(skip + 1, max_depth),
        }
    }

    /// The raw instruction pointers.
    pub fn ips(&self) -> &[usize]
    {
        &self.ips
    }

    pub fn len(&self) -> usize
    {
        self.ips.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.ips.is_empty()
    }

    /// Symbolicate every captured address.
    ///
    /// Addresses that cannot be fully resolved are dropped; inlined call chains expand
    /// to one frame per inlined function. A binary built without line tables resolves
    /// nothing, which is reported once per process.
    pub fn frames(&self) -> Vec<Frame>
    {
        let frames = symbols::resolve_all(&self.ips);
        if frames.is_empty() && !self.ips.is_empty() {
            MISSING_DEBUG_INFO.get_or_init(|| {
                warn!(
                    addresses = self.ips.len(),
                    "captured stack resolved to no frames; build with `debug = \"line-tables-only\"` or more"
                );
            });
        }
        frames
    }
}

/// Walk the stack, locate this function's own frame and return the addresses above it.
///
/// `skip = 0` starts at the caller of `walk`.
#[inline(never)]
fn walk(skip: usize, max_depth: usize) -> Ips
{
    let own: fn(usize, usize) -> Ips = walk;
    let anchor = own as usize;
    let limit = max_depth + skip + UNWINDER_FRAME_ALLOWANCE;

    // (instruction pointer, enclosing function address)
    let mut seen: Vec<(usize, usize)> = Vec::with_capacity(limit);
    backtrace::trace(|frame| {
        seen.push((frame.ip() as usize, frame.symbol_address() as usize));
        seen.len() < limit
    });

    let own_frame = seen.iter().position(|&(_, symbol)| symbol == anchor).or_else(|| {
        seen.iter()
            .enumerate()
            .filter(|&(_, &(ip, _))| ip > anchor && ip - anchor < WALK_BODY_BOUND)
            .min_by_key(|&(_, &(ip, _))| ip - anchor)
            .map(|(index, _)| index)
    });

    let start = if let Some(index) = own_frame {
        index + 1 + skip
    } else {
        trace!(frames = seen.len(), "capture frame not found, skipping from the top of the stack");
        skip
    };

    seen.into_iter().skip(start).take(max_depth).map(|(ip, _)| ip).collect()
}
