//! Poll scheduling.
//!
//! The scheduler owns one repeating timer and drives the
//! probe → parse → present pipeline. Probes run on short-lived worker threads
//! and report back over a channel; the owning thread calls [`PollScheduler::on_tick`]
//! and [`PollScheduler::process_results`] from its own loop, so all state
//! changes happen on that one thread.
//!
//! Every poll gets a monotonically increasing request id. A completed result
//! is only delivered if its id is newer than the last delivered one, so a slow
//! probe finishing late never overwrites fresher data.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::core::parser::parse;
use crate::core::presenter::{present, present_error};
use crate::core::probe::{ProbeError, StatusProbe};
use crate::core::sink::DisplaySink;
use crate::state::PollSettings;

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not started, or torn down.
    Idle,
    /// Timer armed, no scheduled poll outstanding.
    Scheduled,
    /// A scheduled poll is running; timer fires are skipped.
    Polling,
}

/// What caused a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Start,
    Timer,
    SettingsChanged,
    /// Hover, manual refresh. Does not touch the timer.
    OnDemand,
}

impl Trigger {
    /// Polls that belong to the timer cycle (as opposed to on-demand ones).
    const fn is_cycle(self) -> bool {
        !matches!(self, Self::OnDemand)
    }
}

/// The single repeating timer. Replacing it cancels the previous one.
///
/// A period too long to add to the clock leaves the timer without a deadline;
/// it then never fires.
#[derive(Debug)]
struct PollTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl PollTimer {
    fn arm(period: Duration, now: Instant) -> Self {
        tracing::debug!(period_secs = period.as_secs(), "poll timer armed");
        Self {
            period,
            next_due: now.checked_add(period),
        }
    }

    /// Returns `true` and schedules the next fire if the timer is due.
    fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = now.checked_add(self.period);
                true
            }
            _ => false,
        }
    }
}

/// Result of one probe, tagged with the request that produced it.
struct Completed {
    request: u64,
    trigger: Trigger,
    outcome: Result<String, ProbeError>,
}

pub struct PollScheduler {
    probe: Arc<dyn StatusProbe>,
    settings: PollSettings,
    header: String,
    phase: Phase,
    timer: Option<PollTimer>,
    next_request: u64,
    last_delivered: u64,
    /// Request id of the outstanding timer-cycle poll, if any.
    cycle_request: Option<u64>,
    results_tx: Sender<Completed>,
    results_rx: Receiver<Completed>,
}

impl PollScheduler {
    pub fn new(probe: Arc<dyn StatusProbe>, settings: PollSettings, header: impl Into<String>) -> Self {
        let (results_tx, results_rx) = mpsc::channel();
        Self {
            probe,
            settings,
            header: header.into(),
            phase: Phase::Idle,
            timer: None,
            next_request: 0,
            last_delivered: 0,
            cycle_request: None,
            results_tx,
            results_rx,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Number of polls issued so far.
    #[must_use]
    pub const fn requests_issued(&self) -> u64 {
        self.next_request
    }

    /// Poll immediately, then arm the timer. No-op unless idle.
    pub fn start(&mut self, now: Instant) {
        if self.phase != Phase::Idle {
            return;
        }
        tracing::info!(
            interval_secs = self.settings.refresh_interval().as_secs(),
            "starting status polling"
        );
        self.issue(Trigger::Start);
        self.timer = Some(PollTimer::arm(self.settings.refresh_interval(), now));
    }

    /// Advance the clock. Fires a scheduled poll when the timer is due and no
    /// scheduled poll is still running. Returns whether a poll was issued.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }
        let due = self
            .timer
            .as_mut()
            .is_some_and(|timer| timer.fire_if_due(now));
        if !due {
            return false;
        }
        if self.phase == Phase::Polling {
            tracing::debug!("timer fired while a poll is running; skipped");
            return false;
        }
        self.issue(Trigger::Timer);
        true
    }

    /// On-demand poll (hover, manual refresh). Leaves the timer alone.
    pub fn poll_now(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.issue(Trigger::OnDemand);
    }

    /// Replace the settings: cancel the timer, poll once with the new
    /// settings, and re-arm with the new interval.
    pub fn update_settings(&mut self, settings: PollSettings, now: Instant) {
        tracing::info!(
            interval_secs = settings.refresh_interval().as_secs(),
            full_status_hover = settings.full_status_hover,
            show_city_on_panel = settings.show_city_on_panel,
            "poll settings changed"
        );
        self.settings = settings;
        if self.phase == Phase::Idle {
            return;
        }
        self.timer = None;
        self.issue(Trigger::SettingsChanged);
        self.timer = Some(PollTimer::arm(self.settings.refresh_interval(), now));
    }

    /// Cancel the timer. Nothing is polled or delivered afterwards; probes
    /// already running finish on their own and are discarded.
    pub fn stop(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        tracing::info!("stopping status polling");
        self.timer = None;
        self.cycle_request = None;
        self.phase = Phase::Idle;
    }

    /// Deliver every completed probe without blocking. Returns how many
    /// display states reached the sink.
    pub fn process_results(&mut self, sink: &mut dyn DisplaySink) -> usize {
        let mut delivered = 0;
        while let Ok(completed) = self.results_rx.try_recv() {
            if self.handle(completed, sink) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Block up to `timeout` for one completed probe, then drain the rest.
    /// Returns how many display states reached the sink.
    pub fn wait_for_result(&mut self, sink: &mut dyn DisplaySink, timeout: Duration) -> usize {
        match self.results_rx.recv_timeout(timeout) {
            Ok(completed) => self.handle_then_drain(completed, sink),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Block until one probe completes, however long the command takes, then
    /// drain the rest.
    pub fn block_for_result(&mut self, sink: &mut dyn DisplaySink) -> usize {
        match self.results_rx.recv() {
            Ok(completed) => self.handle_then_drain(completed, sink),
            Err(_) => 0,
        }
    }

    fn handle_then_drain(&mut self, completed: Completed, sink: &mut dyn DisplaySink) -> usize {
        let first = usize::from(self.handle(completed, sink));
        first + self.process_results(sink)
    }

    fn issue(&mut self, trigger: Trigger) -> u64 {
        self.next_request += 1;
        let request = self.next_request;

        if trigger.is_cycle() {
            self.cycle_request = Some(request);
            self.phase = Phase::Polling;
        }

        tracing::debug!(request, ?trigger, "issuing status probe");

        let probe = Arc::clone(&self.probe);
        let tx = self.results_tx.clone();
        thread::spawn(move || {
            let outcome = probe.probe();
            // The scheduler may be gone by now; the child has been reaped either way.
            let _ = tx.send(Completed {
                request,
                trigger,
                outcome,
            });
        });

        request
    }

    fn handle(&mut self, completed: Completed, sink: &mut dyn DisplaySink) -> bool {
        let Completed {
            request,
            trigger,
            outcome,
        } = completed;

        if self.phase == Phase::Idle {
            tracing::debug!(request, "result arrived after teardown; discarded");
            return false;
        }

        if self.cycle_request == Some(request) {
            self.cycle_request = None;
            self.phase = Phase::Scheduled;
        }

        if request <= self.last_delivered {
            tracing::debug!(
                request,
                last_delivered = self.last_delivered,
                ?trigger,
                "stale status result dropped"
            );
            return false;
        }
        self.last_delivered = request;

        let state = match outcome {
            Ok(raw) => {
                let status = parse(&raw);
                tracing::debug!(
                    request,
                    state = %status.connection_state(),
                    city = status.city().unwrap_or(""),
                    "status probe succeeded"
                );
                present(&status, &self.settings, &self.header)
            }
            Err(e) => {
                tracing::warn!(
                    request,
                    error = %e,
                    stderr = e.stderr().unwrap_or(""),
                    "status probe failed"
                );
                present_error(&e)
            }
        };

        sink.show(state);
        true
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DisplayState, IconKey};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const WAIT: Duration = Duration::from_secs(5);

    #[derive(Default)]
    struct RecordingSink(Vec<DisplayState>);

    impl DisplaySink for RecordingSink {
        fn show(&mut self, state: DisplayState) {
            self.0.push(state);
        }
    }

    /// Answers every probe with the same text.
    struct FixedProbe(&'static str);

    impl StatusProbe for FixedProbe {
        fn probe(&self) -> Result<String, ProbeError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingProbe;

    impl StatusProbe for FailingProbe {
        fn probe(&self) -> Result<String, ProbeError> {
            Err(ProbeError::Exit {
                code: Some(1),
                stderr: "whoops".to_string(),
            })
        }
    }

    /// Each probe call blocks until the test releases it with a reply.
    #[derive(Default)]
    struct GatedProbe {
        gates: Mutex<VecDeque<Receiver<Result<String, ProbeError>>>>,
    }

    impl GatedProbe {
        fn gate(&self) -> Sender<Result<String, ProbeError>> {
            let (tx, rx) = mpsc::channel();
            self.gates.lock().unwrap().push_back(rx);
            tx
        }
    }

    impl StatusProbe for GatedProbe {
        fn probe(&self) -> Result<String, ProbeError> {
            let gate = self.gates.lock().unwrap().pop_front();
            gate.and_then(|rx| rx.recv().ok())
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn settings(interval: u64) -> PollSettings {
        PollSettings {
            refresh_interval_secs: interval,
            full_status_hover: false,
            show_city_on_panel: true,
        }
    }

    fn scheduler(probe: Arc<dyn StatusProbe>, interval: u64) -> PollScheduler {
        PollScheduler::new(probe, settings(interval), "NordVPN")
    }

    #[test]
    fn test_start_polls_immediately() {
        let mut sched = scheduler(
            Arc::new(FixedProbe("Status: Connected\nCity: Los Angeles")),
            10,
        );
        let mut sink = RecordingSink::default();
        assert_eq!(sched.phase(), Phase::Idle);

        sched.start(Instant::now());
        assert_eq!(sched.phase(), Phase::Polling);
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 1);
        assert_eq!(sched.phase(), Phase::Scheduled);

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].icon_key, IconKey::Connected);
        assert_eq!(sink.0[0].panel_label, "Los Angeles");
    }

    #[test]
    fn test_block_for_result_waits_for_slow_command() {
        let probe = Arc::new(GatedProbe::default());
        let gate = probe.gate();
        let mut sched = scheduler(probe.clone(), 10);
        let mut sink = RecordingSink::default();

        sched.start(Instant::now());
        let release = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            gate.send(Ok("Status: Connected".to_string())).unwrap();
        });

        assert_eq!(sched.block_for_result(&mut sink), 1);
        assert_eq!(sink.0[0].icon_key, IconKey::Connected);
        release.join().unwrap();
    }

    #[test]
    fn test_probe_failure_yields_error_state() {
        let mut sched = scheduler(Arc::new(FailingProbe), 10);
        let mut sink = RecordingSink::default();

        sched.start(Instant::now());
        sched.wait_for_result(&mut sink, WAIT);

        assert_eq!(
            sink.0,
            vec![DisplayState {
                icon_key: IconKey::Error,
                hover_text: "Error fetching status".to_string(),
                panel_label: String::new(),
            }]
        );
        // Still scheduled: the next tick retries.
        assert_eq!(sched.phase(), Phase::Scheduled);
    }

    #[test]
    fn test_timer_fires_on_interval() {
        let mut sched = scheduler(Arc::new(FixedProbe("Status: Disconnected")), 10);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        sched.wait_for_result(&mut sink, WAIT);

        assert!(!sched.on_tick(t0 + Duration::from_secs(9)));
        assert!(sched.on_tick(t0 + Duration::from_secs(10)));
        sched.wait_for_result(&mut sink, WAIT);
        assert!(!sched.on_tick(t0 + Duration::from_secs(15)));
        assert!(sched.on_tick(t0 + Duration::from_secs(20)));
        sched.wait_for_result(&mut sink, WAIT);

        assert_eq!(sched.requests_issued(), 3);
        assert_eq!(sink.0.len(), 3);
    }

    #[test]
    fn test_timer_skipped_while_polling() {
        let probe = Arc::new(GatedProbe::default());
        let first = probe.gate();
        let mut sched = scheduler(probe.clone(), 5);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        assert!(!sched.on_tick(t0 + Duration::from_secs(5)));
        assert_eq!(sched.requests_issued(), 1);

        first.send(Ok("Status: Connected".to_string())).unwrap();
        sched.wait_for_result(&mut sink, WAIT);

        let second = probe.gate();
        assert!(sched.on_tick(t0 + Duration::from_secs(10)));
        second.send(Ok("Status: Connected".to_string())).unwrap();
        sched.wait_for_result(&mut sink, WAIT);
        assert_eq!(sink.0.len(), 2);
    }

    #[test]
    fn test_on_demand_keeps_timer_schedule() {
        let mut sched = scheduler(Arc::new(FixedProbe("Status: Connected")), 10);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        sched.wait_for_result(&mut sink, WAIT);

        sched.poll_now();
        sched.wait_for_result(&mut sink, WAIT);
        assert_eq!(sched.phase(), Phase::Scheduled);

        // Timer still due at t0 + 10, not pushed back by the manual poll.
        assert!(sched.on_tick(t0 + Duration::from_secs(10)));
        sched.wait_for_result(&mut sink, WAIT);
        assert_eq!(sink.0.len(), 3);
    }

    #[test]
    fn test_settings_change_leaves_single_timer() {
        let mut sched = scheduler(Arc::new(FixedProbe("Status: Connected")), 10);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        sched.wait_for_result(&mut sink, WAIT);

        let changed_at = t0 + Duration::from_secs(3);
        sched.update_settings(settings(5), changed_at);
        sched.wait_for_result(&mut sink, WAIT);
        assert_eq!(sched.requests_issued(), 2);

        // Tick every second for 30 seconds after the change.
        let mut fired = Vec::new();
        for s in 1..=30 {
            if sched.on_tick(changed_at + Duration::from_secs(s)) {
                fired.push(s);
                sched.wait_for_result(&mut sink, WAIT);
            }
        }

        // Only the new 5s timer fires; the old 10s timer is gone.
        assert_eq!(fired, vec![5, 10, 15, 20, 25, 30]);
        assert_eq!(sink.0.len(), 8);
    }

    #[test]
    fn test_settings_change_applies_new_presentation() {
        let mut sched = scheduler(Arc::new(FixedProbe("Status: Connected\nCity: Paris")), 10);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        sched.wait_for_result(&mut sink, WAIT);
        assert_eq!(sink.0[0].panel_label, "Paris");

        let hidden = PollSettings {
            show_city_on_panel: false,
            full_status_hover: true,
            ..settings(10)
        };
        sched.update_settings(hidden, t0);
        sched.wait_for_result(&mut sink, WAIT);

        assert_eq!(sink.0[1].panel_label, "");
        assert_eq!(sink.0[1].hover_text, "NordVPN\nStatus: Connected\nCity: Paris");
    }

    #[test]
    fn test_stale_result_does_not_overwrite_newer() {
        let probe = Arc::new(GatedProbe::default());
        let slow = probe.gate();
        let fast = probe.gate();
        let mut sched = scheduler(probe.clone(), 10);
        let mut sink = RecordingSink::default();

        sched.start(Instant::now());
        // Make sure the first worker has taken the first gate before issuing the second.
        while probe.gates.lock().unwrap().len() > 1 {
            thread::yield_now();
        }
        sched.poll_now();

        fast.send(Ok("Status: Connected\nCity: Paris".to_string()))
            .unwrap();
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 1);

        slow.send(Ok("Status: Disconnected".to_string())).unwrap();
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 0);

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].icon_key, IconKey::Connected);
        // The stale result still closes the scheduled cycle.
        assert_eq!(sched.phase(), Phase::Scheduled);
    }

    #[test]
    fn test_in_order_results_both_delivered() {
        let probe = Arc::new(GatedProbe::default());
        let first = probe.gate();
        let second = probe.gate();
        let mut sched = scheduler(probe.clone(), 10);
        let mut sink = RecordingSink::default();

        sched.start(Instant::now());
        while probe.gates.lock().unwrap().len() > 1 {
            thread::yield_now();
        }
        sched.poll_now();

        first.send(Ok("Status: Disconnected".to_string())).unwrap();
        sched.wait_for_result(&mut sink, WAIT);
        second.send(Ok("Status: Connected".to_string())).unwrap();
        sched.wait_for_result(&mut sink, WAIT);

        let icons: Vec<IconKey> = sink.0.iter().map(|s| s.icon_key).collect();
        assert_eq!(icons, vec![IconKey::Disconnected, IconKey::Connected]);
    }

    #[test]
    fn test_stop_discards_late_results_and_timer() {
        let probe = Arc::new(GatedProbe::default());
        let gate = probe.gate();
        let mut sched = scheduler(probe.clone(), 1);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        sched.stop();
        assert_eq!(sched.phase(), Phase::Idle);

        gate.send(Ok("Status: Connected".to_string())).unwrap();
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 0);
        assert!(sink.0.is_empty());

        assert!(!sched.on_tick(t0 + Duration::from_secs(60)));
        sched.poll_now();
        assert_eq!(sched.requests_issued(), 1);
    }

    #[test]
    fn test_huge_interval_never_fires() {
        let mut sched = scheduler(
            Arc::new(FixedProbe("Status: Connected")),
            u64::try_from(i64::MAX).unwrap(),
        );
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 1);
        assert!(!sched.on_tick(t0 + Duration::from_secs(3600)));

        sched.update_settings(settings(u64::MAX), t0);
        sched.wait_for_result(&mut sink, WAIT);
        assert!(!sched.on_tick(t0 + Duration::from_secs(86_400)));
        assert_eq!(sink.0.len(), 2);
    }

    #[test]
    fn test_blank_output_presents_as_disconnected() {
        let mut sched = scheduler(
            Arc::new(crate::core::probe::CommandProbe::new(&[
                "/bin/sh".to_string(),
                "-c".to_string(),
                "printf '  \\n'".to_string(),
            ])),
            10,
        );
        let mut sink = RecordingSink::default();

        sched.start(Instant::now());
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 1);

        assert_eq!(
            sink.0,
            vec![DisplayState {
                icon_key: IconKey::Disconnected,
                hover_text: "NordVPN\n".to_string(),
                panel_label: String::new(),
            }]
        );
    }

    #[test]
    fn test_settings_change_during_scheduled_poll() {
        let probe = Arc::new(GatedProbe::default());
        let old = probe.gate();
        let new = probe.gate();
        let mut sched = scheduler(probe.clone(), 10);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        while probe.gates.lock().unwrap().len() > 1 {
            thread::yield_now();
        }
        sched.update_settings(settings(5), t0 + Duration::from_secs(2));
        assert_eq!(sched.phase(), Phase::Polling);

        new.send(Ok("Status: Connected\nCity: Oslo".to_string()))
            .unwrap();
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 1);
        assert_eq!(sched.phase(), Phase::Scheduled);

        old.send(Ok("Status: Disconnected".to_string())).unwrap();
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 0);
        assert_eq!(sched.phase(), Phase::Scheduled);

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].icon_key, IconKey::Connected);
        assert_eq!(sink.0[0].panel_label, "Oslo");
    }

    #[test]
    fn test_newer_cycle_poll_keeps_polling_until_it_completes() {
        let probe = Arc::new(GatedProbe::default());
        let old = probe.gate();
        let new = probe.gate();
        let mut sched = scheduler(probe.clone(), 10);
        let mut sink = RecordingSink::default();
        let t0 = Instant::now();

        sched.start(t0);
        while probe.gates.lock().unwrap().len() > 1 {
            thread::yield_now();
        }
        sched.update_settings(settings(5), t0);

        // The superseded start poll finishing first does not end the cycle.
        old.send(Ok("Status: Disconnected".to_string())).unwrap();
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 1);
        assert_eq!(sched.phase(), Phase::Polling);
        assert!(!sched.on_tick(t0 + Duration::from_secs(5)));

        new.send(Ok("Status: Connected".to_string())).unwrap();
        assert_eq!(sched.wait_for_result(&mut sink, WAIT), 1);
        assert_eq!(sched.phase(), Phase::Scheduled);

        let icons: Vec<IconKey> = sink.0.iter().map(|s| s.icon_key).collect();
        assert_eq!(icons, vec![IconKey::Disconnected, IconKey::Connected]);
    }

    #[test]
    fn test_idle_scheduler_ignores_triggers() {
        let mut sched = scheduler(Arc::new(FixedProbe("Status: Connected")), 10);
        sched.poll_now();
        assert!(!sched.on_tick(Instant::now() + Duration::from_secs(100)));
        sched.update_settings(settings(3), Instant::now());
        assert_eq!(sched.requests_issued(), 0);
        assert_eq!(sched.settings().refresh_interval_secs, 3);
    }
}
