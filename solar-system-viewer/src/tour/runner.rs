/// What happened to the step sequence during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSignal {
    Started(usize),
    Completed(usize),
    Finished,
}

/// Plays a list of timed steps strictly in order.
///
/// A step starts only once its predecessor has completed. Time left over
/// when a step completes flows into the next one, so a long frame never
/// stretches the overall schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRunner {
    durations: Vec<f32>,
    current: usize,
    elapsed: f32,
    started: bool,
    finished: bool,
}

impl StepRunner {
    pub fn new(durations: Vec<f32>) -> Self {
        Self {
            durations,
            current: 0,
            elapsed: 0.0,
            started: false,
            finished: false,
        }
    }

    pub fn advance(&mut self, delta_secs: f32) -> Vec<StepSignal> {
        let mut signals = Vec::new();
        if self.finished {
            return signals;
        }

        let mut remaining = delta_secs.max(0.0);
        loop {
            let Some(&duration) = self.durations.get(self.current) else {
                self.finished = true;
                signals.push(StepSignal::Finished);
                break;
            };

            if !self.started {
                self.started = true;
                self.elapsed = 0.0;
                signals.push(StepSignal::Started(self.current));
            }

            let needed = (duration - self.elapsed).max(0.0);
            if remaining < needed {
                self.elapsed += remaining;
                break;
            }

            remaining -= needed;
            self.elapsed = duration;
            signals.push(StepSignal::Completed(self.current));
            self.current += 1;
            self.started = false;
        }
        signals
    }

    /// Index of the running step, if any.
    pub fn current(&self) -> Option<usize> {
        (self.started && !self.finished).then_some(self.current)
    }

    /// Fraction of the running step completed, in 0..=1.
    pub fn progress(&self) -> f32 {
        match self.durations.get(self.current) {
            Some(duration) if *duration > 0.0 => (self.elapsed / duration).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use StepSignal::*;

    #[test]
    fn first_advance_starts_the_first_step() {
        let mut runner = StepRunner::new(vec![1.0, 2.0]);
        assert_eq!(runner.advance(0.0), vec![Started(0)]);
        assert_eq!(runner.current(), Some(0));
        assert_relative_eq!(runner.progress(), 0.0);
    }

    #[test]
    fn leftover_time_carries_into_the_next_step() {
        let mut runner = StepRunner::new(vec![1.0, 2.0]);
        runner.advance(0.5);

        assert_eq!(runner.advance(1.0), vec![Completed(0), Started(1)]);
        assert_eq!(runner.current(), Some(1));
        assert_relative_eq!(runner.progress(), 0.25);
    }

    #[test]
    fn a_long_frame_can_cross_several_steps_in_order() {
        let mut runner = StepRunner::new(vec![1.0, 0.5, 3.0]);
        assert_eq!(
            runner.advance(10.0),
            vec![
                Started(0),
                Completed(0),
                Started(1),
                Completed(1),
                Started(2),
                Completed(2),
                Finished
            ]
        );
        assert!(runner.is_finished());
        assert_eq!(runner.current(), None);
        assert!(runner.advance(1.0).is_empty());
    }

    #[test]
    fn zero_length_steps_complete_immediately() {
        let mut runner = StepRunner::new(vec![0.0]);
        assert_eq!(runner.advance(0.0), vec![Started(0), Completed(0), Finished]);
    }

    #[test]
    fn empty_runner_finishes_at_once() {
        let mut runner = StepRunner::new(Vec::new());
        assert_eq!(runner.advance(0.016), vec![Finished]);
        assert!(runner.is_finished());
    }
}
