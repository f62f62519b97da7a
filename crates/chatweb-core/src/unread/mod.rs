mod heuristic;
mod subscription;
mod tracker;

pub use {
    heuristic::{evaluate, matches_attention_targets, title_indicates_unread},
    subscription::UnreadSubscription,
    tracker::{AttentionChange, UnreadTracker},
};

pub(crate) use heuristic::{BADGE_PATTERNS, badge_patterns};
