//! Quest manager - quest lifecycle plus a FIFO notification queue
//!
//! Every notification is queued with its recipient resolved at raise time.
//! `dispatch` drains the queue in order, looking the quest and observer up
//! at delivery time, so registering before a quest exists or while a
//! dispatch is pending never loses an event.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::combat::log::CombatLog;
use crate::core::types::{CharacterId, QuestId};
use crate::quests::observer::ObserverRegistry;
use crate::quests::quest::{Quest, QuestState, RewardKind};
use crate::quests::world_state::WorldState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestEvent {
    Started,
    Updated(String),
    ObjectiveCompleted(usize),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub quest: QuestId,
    pub observer: CharacterId,
    pub event: QuestEvent,
}

#[derive(Debug, Default)]
pub struct QuestManager {
    quests: Vec<Quest>,
    observers: Vec<CharacterId>,
    quest_observers: AHashMap<QuestId, Vec<CharacterId>>,
    pending: VecDeque<Notification>,
    rewards_earned: AHashMap<RewardKind, u32>,
}

impl QuestManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== REGISTRATION =====

    /// Observe every quest; replays `Started` for quests already in progress
    pub fn register_observer(&mut self, observer: CharacterId) {
        if self.observers.contains(&observer) {
            return;
        }
        self.observers.push(observer);
        let active: Vec<QuestId> = self.active_quests().map(|q| q.id).collect();
        for quest in active {
            self.enqueue(quest, observer, QuestEvent::Started);
        }
    }

    /// Observe one quest; replays `Started` if it is in progress at delivery
    pub fn register_observer_for_quest(&mut self, observer: CharacterId, quest: QuestId) {
        let list = self.quest_observers.entry(quest).or_default();
        if list.contains(&observer) {
            return;
        }
        list.push(observer);
        self.enqueue(quest, observer, QuestEvent::Started);
    }

    /// Stop all delivery to `observer`, including anything still queued
    pub fn unregister_observer(&mut self, observer: CharacterId) {
        self.observers.retain(|o| *o != observer);
        for list in self.quest_observers.values_mut() {
            list.retain(|o| *o != observer);
        }
        self.pending.retain(|n| n.observer != observer);
    }

    pub fn unregister_observer_from_quest(&mut self, observer: CharacterId, quest: QuestId) {
        if let Some(list) = self.quest_observers.get_mut(&quest) {
            list.retain(|o| *o != observer);
        }
    }

    // ===== LIFECYCLE =====

    /// Accept a quest; it moves to InProgress
    pub fn add_quest(&mut self, mut quest: Quest) -> QuestId {
        if quest.state == QuestState::Available {
            quest.state = QuestState::InProgress;
        }
        let id = quest.id;
        let message = format!("New quest available: {}", quest.name);
        tracing::info!(quest = %quest.name, "quest added");
        self.quests.push(quest);
        self.notify(id, QuestEvent::Updated(message));
        id
    }

    /// Re-check every quest in progress; returns how many completed in this pass
    pub fn update_quests(&mut self, world: &WorldState) -> usize {
        let mut raised = Vec::new();
        let mut completed = 0;

        for quest in self
            .quests
            .iter_mut()
            .filter(|q| q.state == QuestState::InProgress)
        {
            let newly = quest.check_objectives(world);
            for index in &newly {
                raised.push((quest.id, QuestEvent::ObjectiveCompleted(*index)));
            }
            if !newly.is_empty() {
                raised.push((
                    quest.id,
                    QuestEvent::Updated(format!("Quest progress updated: {}", quest.name)),
                ));
            }
            if quest.is_completed() {
                quest.state = QuestState::Completed;
                for (kind, amount) in &quest.rewards {
                    *self.rewards_earned.entry(*kind).or_insert(0) += amount;
                }
                tracing::info!(quest = %quest.name, "quest completed");
                raised.push((quest.id, QuestEvent::Completed));
                completed += 1;
            }
        }

        for (quest, event) in raised {
            self.notify(quest, event);
        }
        completed
    }

    pub fn fail_quest(&mut self, id: QuestId) -> bool {
        let Some(quest) = self.quests.iter_mut().find(|q| q.id == id) else {
            return false;
        };
        if quest.state != QuestState::InProgress {
            return false;
        }
        quest.state = QuestState::Failed;
        let message = format!("Quest failed: {}", quest.name);
        self.notify(id, QuestEvent::Updated(message));
        true
    }

    // ===== DELIVERY =====

    /// Deliver queued notifications in FIFO order; returns how many were delivered
    pub fn dispatch(&mut self, registry: &mut dyn ObserverRegistry, log: &mut CombatLog) -> usize {
        let mut delivered = 0;
        while let Some(note) = self.pending.pop_front() {
            let Some(quest) = self.quests.iter().find(|q| q.id == note.quest) else {
                tracing::warn!(quest = ?note.quest, "notification for unknown quest dropped");
                continue;
            };
            // Only quests still in progress can be started
            if note.event == QuestEvent::Started && quest.state != QuestState::InProgress {
                tracing::debug!(quest = %quest.name, state = ?quest.state, "stale start dropped");
                continue;
            }
            let Some(observer) = registry.observer_mut(note.observer) else {
                tracing::warn!(observer = ?note.observer, "notification for unknown observer dropped");
                continue;
            };
            match &note.event {
                QuestEvent::Started => observer.on_quest_started(quest, log),
                QuestEvent::Updated(message) => observer.on_quest_updated(quest, message, log),
                QuestEvent::ObjectiveCompleted(index) => match quest.objectives.get(*index) {
                    Some(objective) => observer.on_objective_updated(quest, objective, log),
                    None => continue,
                },
                QuestEvent::Completed => observer.on_quest_completed(quest, log),
            }
            delivered += 1;
        }
        delivered
    }

    fn enqueue(&mut self, quest: QuestId, observer: CharacterId, event: QuestEvent) {
        self.pending.push_back(Notification {
            quest,
            observer,
            event,
        });
    }

    /// Queue `event` for global observers, then the quest's own
    fn notify(&mut self, quest: QuestId, event: QuestEvent) {
        let mut recipients = self.observers.clone();
        if let Some(list) = self.quest_observers.get(&quest) {
            for observer in list {
                if !recipients.contains(observer) {
                    recipients.push(*observer);
                }
            }
        }
        for observer in recipients {
            self.enqueue(quest, observer, event.clone());
        }
    }

    // ===== QUERIES =====

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn quest(&self, id: QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn active_quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests
            .iter()
            .filter(|q| q.state == QuestState::InProgress)
    }

    pub fn rewards_earned(&self, kind: RewardKind) -> u32 {
        self.rewards_earned.get(&kind).copied().unwrap_or(0)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
