use std::time::Duration;

/// Turns frame-sized chunks of elapsed time into whole fixed periods.
#[derive(Clone, Debug)]
pub struct Ticker
{
    period: Duration,
    carried: Duration,
}

impl Ticker
{
    pub fn new(period: Duration) -> Self
    {
        Self {
            period: period.max(Duration::from_millis(1)),
            carried: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) -> u32
    {
        self.carried += elapsed;
        let mut due = 0u32;
        while self.carried >= self.period {
            self.carried -= self.period;
            due = due.saturating_add(1);
        }
        due
    }

    pub fn reset(&mut self)
    {
        self.carried = Duration::ZERO;
    }
}
