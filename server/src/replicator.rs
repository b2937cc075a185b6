use std::collections::HashMap;

use glam::{Quat, Vec3};
use log::{trace, warn};

use posesync_shared::{
    ApplyPose, PeerId, Pose, SendScheduler, SmoothingState, SubmitMove, SyncConfig,
};

use crate::{
    peer_context::{PeerRoster, PoseSender},
    send_record::PeerSendRecord,
    validator::{AlwaysValid, MoveValidator},
};

/// Authority-side replication state for one entity.
///
/// Owns the ground-truth pose, the per-observer send records, and the
/// injected move validator. All methods run within the single sequential
/// simulation tick of the hosting peer; tick order is fixed at (1) advance
/// local smoothing, (2) evaluate local scheduler/authority logic, (3) run
/// the backfill sweep, so no synchronization primitive is required.
pub struct PoseReplicator {
    pose: Pose,
    local_peer: PeerId,
    authority_peer: PeerId,
    config: SyncConfig,
    validator: Box<dyn MoveValidator>,
    scheduler: SendScheduler,
    smoothing: SmoothingState,
    send_records: HashMap<PeerId, PeerSendRecord>,
}

impl PoseReplicator {
    pub fn new(local_peer: PeerId, authority_peer: PeerId, pose: Pose, config: SyncConfig) -> Self {
        Self {
            pose,
            local_peer,
            authority_peer,
            config,
            validator: Box::new(AlwaysValid),
            scheduler: SendScheduler::new(),
            smoothing: SmoothingState::new(pose),
            send_records: HashMap::new(),
        }
    }

    pub fn set_validator(&mut self, validator: Box<dyn MoveValidator>) {
        self.validator = validator;
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SyncConfig {
        &mut self.config
    }

    pub fn authority_peer(&self) -> PeerId {
        self.authority_peer
    }

    pub fn set_authority_peer(&mut self, peer: PeerId) {
        self.authority_peer = peer;
    }

    /// Whether moves for this entity originate on this peer.
    pub fn is_local_authority(&self) -> bool {
        self.local_peer == self.authority_peer
    }

    /// The ground-truth pose, as last accepted.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// The pose to render on this peer: smoothed when
    /// `interpolate_on_authority_server` is set, otherwise the ground truth.
    pub fn rendered_pose(&self) -> Pose {
        if self.config.interpolate_on_authority_server() {
            self.smoothing.sample(self.config.extrapolate())
        } else {
            self.pose
        }
    }

    pub fn send_record(&self, peer: PeerId) -> Option<&PeerSendRecord> {
        self.send_records.get(&peer)
    }

    /// Moves the entity when this peer is the authority. The scheduler
    /// decides on the next tick whether the motion is worth replicating.
    pub fn set_local_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Moves instantly, bypassing all gating and smoothing.
    pub fn teleport(&mut self, position: Vec3, rotation: Quat) {
        let pose = Pose::new(position, rotation);
        self.pose = pose;
        self.smoothing.teleport(pose);
    }

    /// Entry point for a raw `SubmitMove` payload off the wire. A payload
    /// the codec cannot decode is discarded without any pose change.
    pub fn submit_move_bytes<R: PeerRoster, S: PoseSender>(
        &mut self,
        from: PeerId,
        bytes: &[u8],
        now: f64,
        roster: &R,
        sender: &mut S,
    ) {
        match SubmitMove::from_bytes(bytes) {
            Ok(message) => self.submit_move(from, &message, now, roster, sender),
            Err(err) => {
                warn!("discarding malformed move payload from peer {from}: {err:?}");
            }
        }
    }

    /// Validates and applies a candidate move from the owning peer, then
    /// fans it out to observers.
    ///
    /// A rejected move is discarded silently: no state change and no
    /// corrective reply (rubber-banding is a future extension of the
    /// validator seam, not implemented here).
    pub fn submit_move<R: PeerRoster, S: PoseSender>(
        &mut self,
        from: PeerId,
        message: &SubmitMove,
        now: f64,
        roster: &R,
        sender: &mut S,
    ) {
        if from != self.authority_peer {
            warn!(
                "discarding move from peer {from}: authority for this entity is peer {}",
                self.authority_peer
            );
            return;
        }

        let candidate = message.to_pose();
        if !self
            .validator
            .is_valid_move(self.pose.position, candidate.position)
        {
            trace!("validator rejected move from peer {from}");
            return;
        }

        self.apply_accepted(candidate);
        self.fan_out(candidate, now, roster, sender);
    }

    /// Per-tick evaluation on the authority side, in the fixed order the
    /// concurrency model requires.
    pub fn tick<R: PeerRoster, S: PoseSender>(
        &mut self,
        now: f64,
        delta_seconds: f32,
        roster: &R,
        sender: &mut S,
    ) {
        // (1) advance local smoothing
        if self.config.interpolate_on_authority_server() {
            let steps = self.config.lerp_steps_per_second(true, 0.0);
            self.smoothing
                .advance(delta_seconds, steps, self.config.extrapolate());
        }

        // (2) local scheduler, for entities this peer has authority over
        if self.is_local_authority() {
            let current = self.pose;
            if let Some(candidate) = self.scheduler.consider(now, &current, &self.config) {
                self.apply_accepted(candidate);
                self.fan_out(candidate, now, roster, sender);
            }
        }

        // (3) backfill sweep
        self.backfill_sweep(now, roster, sender);
    }

    fn apply_accepted(&mut self, candidate: Pose) {
        if self.config.interpolate_on_authority_server() {
            self.smoothing.set_target(candidate, &self.config);
        } else {
            self.smoothing.teleport(candidate);
        }
        self.pose = candidate;
    }

    fn fan_out<R: PeerRoster, S: PoseSender>(
        &mut self,
        candidate: Pose,
        now: f64,
        roster: &R,
        sender: &mut S,
    ) {
        let message = ApplyPose::from_pose(&candidate);

        if !self.config.enable_distance_throttle() {
            for peer in roster.observer_ids() {
                if peer == self.authority_peer {
                    continue;
                }
                sender.send_pose(peer, message);
            }
            return;
        }

        for peer in roster.observer_ids() {
            if peer == self.authority_peer {
                continue;
            }

            let distance = Self::observer_distance(roster, peer, candidate.position);
            let period = self.config.distance_rate_curve().period(distance) as f64;

            let record = self.send_records.entry(peer).or_insert_with(PeerSendRecord::new);
            if now - record.last_sent_at >= period {
                sender.send_pose(peer, message);
                record.last_sent_at = now;
                record.pending_missed_pose = None;
            } else {
                // Withheld; the newest candidate supersedes any earlier one.
                record.pending_missed_pose = Some(candidate);
            }
        }
    }

    /// Catches observers the throttle skipped, pushing them the current
    /// ground truth independently of any incoming move. Keeps observers
    /// converging during sustained throttle windows, including those whose
    /// withheld candidate was never resent verbatim.
    fn backfill_sweep<R: PeerRoster, S: PoseSender>(
        &mut self,
        now: f64,
        roster: &R,
        sender: &mut S,
    ) {
        if !self.config.enable_distance_throttle() || !self.config.enable_missed_send_backfill() {
            return;
        }

        let current = self.pose;
        for peer in roster.observer_ids() {
            if peer == self.authority_peer {
                continue;
            }

            let distance = Self::observer_distance(roster, peer, current.position);
            let period = self.config.distance_rate_curve().period(distance) as f64;

            let record = self.send_records.entry(peer).or_insert_with(PeerSendRecord::new);
            if now - record.last_sent_at >= period {
                sender.send_pose(peer, ApplyPose::from_pose(&current));
                record.last_sent_at = now;
                record.pending_missed_pose = None;
            }
        }
    }

    fn observer_distance<R: PeerRoster>(roster: &R, peer: PeerId, entity_position: Vec3) -> f32 {
        match roster.avatar_position(peer) {
            Some(avatar) => avatar.distance(entity_position),
            None => {
                // No avatar known for this observer; treat it as adjacent so
                // it still receives updates at full rate.
                trace!("no avatar position for peer {peer}, throttling at distance 0");
                0.0
            }
        }
    }
}
