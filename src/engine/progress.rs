use log::debug;

/// Receives progress ticks from long-running engine calls.
pub trait Progress {
    fn advance(&mut self, n: usize);
}

impl Progress for () {
    fn advance(&mut self, _n: usize) {}
}

impl<P: Progress> Progress for Option<P> {
    fn advance(&mut self, n: usize) {
        if let Some(inner) = self {
            inner.advance(n);
        }
    }
}

impl Progress for kdam::Bar {
    fn advance(&mut self, n: usize) {
        if let Err(e) = kdam::BarExt::update(self, n) {
            debug!("progress bar update failed: {e}");
        }
    }
}

/// Counts ticks, used to check how much work an algorithm performed
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TickCounter {
    pub ticks: usize,
}

#[cfg(test)]
impl Progress for TickCounter {
    fn advance(&mut self, n: usize) {
        self.ticks += n;
    }
}
