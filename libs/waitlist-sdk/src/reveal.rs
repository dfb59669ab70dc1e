//! Staged reveal of a screen's sections.
//!
//! A schedule is an ordered list of `(delay, stage)` steps. Stage `n` becomes
//! visible once its delay has elapsed since the screen appeared; stages only
//! ever increase.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    pub delay: Duration,
    pub stage: u8,
    pub label: &'static str,
}

impl RevealStep {
    pub const fn new(delay_ms: u64, stage: u8, label: &'static str) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            stage,
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSchedule {
    steps: Vec<RevealStep>,
}

const LANDING_STEPS: [RevealStep; 5] = [
    RevealStep::new(200, 1, "Logo"),
    RevealStep::new(400, 2, "Badge"),
    RevealStep::new(600, 3, "Headline"),
    RevealStep::new(800, 4, "Description"),
    RevealStep::new(1000, 5, "Form"),
];

const SUCCESS_STEPS: [RevealStep; 6] = [
    RevealStep::new(200, 1, "Logo"),
    RevealStep::new(400, 2, "Success icon"),
    RevealStep::new(600, 3, "Headline"),
    RevealStep::new(800, 4, "Subtitle"),
    RevealStep::new(1000, 5, "What happens next"),
    RevealStep::new(1200, 6, "Referral"),
];

impl RevealSchedule {
    /// Steps are ordered by delay; equal delays keep their given order.
    pub fn new(mut steps: Vec<RevealStep>) -> Self {
        steps.sort_by_key(|s| s.delay);
        Self { steps }
    }

    /// Landing and pending screens.
    pub fn landing() -> Self {
        Self::new(LANDING_STEPS.to_vec())
    }

    pub fn success() -> Self {
        Self::new(SUCCESS_STEPS.to_vec())
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    /// Highest stage visible `elapsed` after the screen appeared, 0 before the first step.
    pub fn visible_stage(&self, elapsed: Duration) -> u8 {
        self.steps
            .iter()
            .take_while(|s| s.delay <= elapsed)
            .map(|s| s.stage)
            .max()
            .unwrap_or(0)
    }

    /// Stage shown once every step has fired.
    pub fn final_stage(&self) -> u8 {
        self.steps.iter().map(|s| s.stage).max().unwrap_or(0)
    }

    /// Drive the schedule with a single timer loop, reporting each newly
    /// visible stage. Dropping the future cancels the remaining steps.
    pub async fn play<F>(&self, mut on_stage: F)
    where
        F: FnMut(u8, &RevealStep),
    {
        let start = Instant::now();
        let mut visible = 0;

        for step in &self.steps {
            sleep_until(start + step.delay).await;
            if step.stage > visible {
                visible = step.stage;
                on_stage(visible, step);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_stage_follows_delays() {
        let schedule = RevealSchedule::landing();

        assert_eq!(schedule.visible_stage(Duration::ZERO), 0);
        assert_eq!(schedule.visible_stage(Duration::from_millis(199)), 0);
        assert_eq!(schedule.visible_stage(Duration::from_millis(200)), 1);
        assert_eq!(schedule.visible_stage(Duration::from_millis(650)), 3);
        assert_eq!(schedule.visible_stage(Duration::from_secs(5)), 5);
        assert_eq!(schedule.final_stage(), 5);
    }

    #[test]
    fn test_success_schedule_has_referral_last() {
        let schedule = RevealSchedule::success();
        let last = schedule.steps().last().unwrap();

        assert_eq!(last.label, "Referral");
        assert_eq!(last.delay, Duration::from_millis(1200));
        assert_eq!(schedule.final_stage(), 6);
    }

    #[test]
    fn test_new_orders_steps_by_delay() {
        let schedule = RevealSchedule::new(vec![
            RevealStep::new(300, 2, "b"),
            RevealStep::new(100, 1, "a"),
        ]);

        let labels: Vec<_> = schedule.steps().iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_reports_each_stage_at_its_delay() {
        let schedule = RevealSchedule::landing();
        let start = Instant::now();
        let mut seen = Vec::new();

        schedule
            .play(|stage, _| seen.push((stage, start.elapsed())))
            .await;

        let stages: Vec<u8> = seen.iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, vec![1, 2, 3, 4, 5]);
        assert_eq!(seen[0].1.as_millis(), 200);
        assert_eq!(seen[4].1.as_millis(), 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_never_moves_backwards() {
        let schedule = RevealSchedule::new(vec![
            RevealStep::new(100, 3, "late-but-high"),
            RevealStep::new(200, 2, "lower"),
            RevealStep::new(300, 4, "higher"),
        ]);
        let mut seen = Vec::new();

        schedule.play(|stage, _| seen.push(stage)).await;

        assert_eq!(seen, vec![3, 4]);
    }
}
