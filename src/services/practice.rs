//! # 연습 세션 관리
//!
//! 예문 목록의 스냅샷으로 무작위 복습 큐를 만들고, 카드 위치와 정답 공개 여부를 추적합니다.
//! 세션은 서버 메모리에만 존재하며 DB에 저장되지 않습니다.
//!
//! ## 세션 상태 전이
//! ```text
//! NotStarted ──start──→ Active(position, revealed) ──advance(마지막)──→ Ended
//!                        │  ↑ reveal: revealed false → true
//!                        └──┘ advance: position + 1, revealed = false
//! 어떤 상태든 exit → NotStarted (큐 폐기)
//! ```
//!
//! ## 진행 중 변경 반영
//! 세션 중에 체크 표시가 바뀌거나 예문이 삭제되면 라우트 핸들러가
//! `PracticeManager::apply_checked` / `remove_by_id`를 호출하여
//! 살아 있는 모든 세션의 큐를 ID 기준으로 맞춥니다.
//!
//! 현재 보고 있는 카드가 삭제되면 다음 카드가 그 자리로 당겨지며(정답은 다시 숨김),
//! 마지막 카드였다면 세션이 끝납니다.

use crate::{
    error::AppError,
    models::{Advance, AdvanceResponse, PracticeCard, PracticeView, SentencePair},
};
use chrono::{DateTime, Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use std::{collections::HashMap, future::Future, sync::Arc};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// 정리(exit)되지 않은 세션이 메모리에 남아 있을 수 있는 최대 시간
const SESSION_TTL_HOURS: i64 = 12;

/// 연습 세션 오용
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PracticeError {
    /// 연습할 문장이 하나도 없음
    #[error("No sentences to practice")]
    EmptyQueue,

    /// 이미 끝난 세션
    #[error("Practice session has ended")]
    SessionEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Active,
    Ended,
}

/// 하나의 연습 세션
///
/// 큐의 구성은 시작 시점에 고정됩니다. 이후에는 체크 표시 갱신과
/// 삭제에 의한 제거만 일어납니다.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    id: Uuid,
    queue: Vec<SentencePair>,
    position: usize,
    revealed: bool,
    state: SessionState,
    started_at: DateTime<Utc>,
}

impl PracticeSession {
    /// 스레드 로컬 난수 생성기로 섞은 큐로 세션을 시작합니다.
    pub fn start(sentences: Vec<SentencePair>) -> Result<Self, PracticeError> {
        Self::start_with_rng(sentences, &mut rand::rng())
    }

    /// 주어진 난수 생성기로 섞은 큐로 세션을 시작합니다.
    ///
    /// `SliceRandom::shuffle`은 Fisher–Yates 알고리즘이므로
    /// 모든 순열이 같은 확률로 나옵니다.
    pub fn start_with_rng<R: Rng + ?Sized>(
        mut sentences: Vec<SentencePair>,
        rng: &mut R,
    ) -> Result<Self, PracticeError> {
        if sentences.is_empty() {
            return Err(PracticeError::EmptyQueue);
        }
        sentences.shuffle(rng);

        Ok(Self {
            id: Uuid::now_v7(),
            queue: sentences,
            position: 0,
            revealed: false,
            state: SessionState::Active,
            started_at: Utc::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.position
    }

    #[cfg(test)]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    #[cfg(test)]
    pub fn queue(&self) -> &[SentencePair] {
        &self.queue
    }

    /// 현재 카드
    pub fn current(&self) -> Result<&SentencePair, PracticeError> {
        if self.is_ended() {
            return Err(PracticeError::SessionEnded);
        }
        self.queue.get(self.position).ok_or(PracticeError::SessionEnded)
    }

    /// 현재 카드의 정답을 공개합니다. 여러 번 호출해도 결과는 같습니다.
    pub fn reveal(&mut self) -> Result<(), PracticeError> {
        self.current()?;
        self.revealed = true;
        Ok(())
    }

    /// 다음 카드로 넘어갑니다.
    ///
    /// 마지막 카드에서 호출하면 위치는 그대로 두고 세션을 끝냅니다.
    pub fn advance(&mut self) -> Advance {
        if self.is_ended() {
            return Advance::SessionEnded;
        }
        if self.position + 1 < self.queue.len() {
            self.position += 1;
            self.revealed = false;
            Advance::Continuing
        } else {
            self.state = SessionState::Ended;
            Advance::SessionEnded
        }
    }

    /// 큐 안의 같은 ID 항목에 체크 표시를 반영합니다. 일치하는 항목이 있었는지 반환.
    pub fn apply_checked(&mut self, id: i64, value: bool) -> bool {
        match self.queue.iter_mut().find(|s| s.id == id) {
            Some(sentence) => {
                sentence.is_checked = value;
                true
            }
            None => false,
        }
    }

    /// 큐에서 같은 ID 항목을 제거합니다. 제거했는지 반환.
    pub fn remove_by_id(&mut self, id: i64) -> bool {
        let Some(index) = self.queue.iter().position(|s| s.id == id) else {
            return false;
        };
        self.queue.remove(index);

        if self.queue.is_empty() {
            self.position = 0;
            self.revealed = false;
            self.state = SessionState::Ended;
            return true;
        }

        if index < self.position {
            // 앞쪽 카드가 빠지면 보고 있던 카드가 한 칸 당겨집니다
            self.position -= 1;
        } else if index == self.position {
            self.revealed = false;
            if self.position >= self.queue.len() {
                self.position = self.queue.len() - 1;
                self.state = SessionState::Ended;
            }
        }
        true
    }

    /// 클라이언트에 보낼 현재 상태 스냅샷
    pub fn view(&self) -> PracticeView {
        let card = self.current().ok().map(|sentence| PracticeCard {
            id: sentence.id,
            japanese: sentence.japanese.clone(),
            english: self.revealed.then(|| sentence.english.clone()),
            is_checked: sentence.is_checked,
        });

        PracticeView {
            session_id: self.id,
            position: self.position,
            total: self.queue.len(),
            revealed: self.revealed,
            ended: self.is_ended(),
            card,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.started_at > Duration::hours(SESSION_TTL_HOURS)
    }
}

/// 살아 있는 연습 세션 레지스트리
///
/// `Arc<RwLock<...>>`: 여러 요청이 같은 맵을 공유하고,
/// 조회는 동시에, 변경은 한 번에 하나씩 일어나도록 합니다.
///
/// 잠금을 쥔 채 DB를 기다리는 곳은 `start`의 목록 조회 한 곳뿐입니다.
/// 게이트웨이 호출 중에는 잠금을 잡지 않습니다.
#[derive(Clone, Default)]
pub struct PracticeManager {
    sessions: Arc<RwLock<HashMap<Uuid, PracticeSession>>>,
}

impl PracticeManager {
    /// 새 세션을 시작하고 첫 카드 상태를 반환합니다.
    ///
    /// `load`(예문 목록 조회)는 쓰기 잠금을 잡은 뒤에 실행됩니다.
    /// 그래서 목록을 읽은 뒤 끝난 삭제/체크 변경의 반영(`remove_by_id`,
    /// `apply_checked`)은 새 세션이 등록될 때까지 기다렸다가 그 세션에도 적용됩니다.
    pub async fn start<F>(&self, load: F) -> Result<PracticeView, AppError>
    where
        F: Future<Output = Result<Vec<SentencePair>, AppError>>,
    {
        let mut sessions = self.sessions.write().await;

        let session = PracticeSession::start(load.await?)?;
        let view = session.view();

        let now = Utc::now();
        sessions.retain(|_, s| !s.is_expired(now));
        sessions.insert(session.id(), session);

        tracing::info!(
            session_id = %view.session_id,
            total = view.total,
            "Started practice session"
        );
        Ok(view)
    }

    pub async fn view(&self, id: Uuid) -> Result<PracticeView, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(PracticeSession::view)
            .ok_or(AppError::NotFound)
    }

    pub async fn reveal(&self, id: Uuid) -> Result<PracticeView, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(AppError::NotFound)?;
        session.reveal()?;
        Ok(session.view())
    }

    pub async fn advance(&self, id: Uuid) -> Result<AdvanceResponse, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(AppError::NotFound)?;
        let outcome = session.advance();
        if outcome == Advance::SessionEnded {
            tracing::debug!(session_id = %id, "Practice session finished");
        }
        Ok(AdvanceResponse {
            outcome,
            view: session.view(),
        })
    }

    /// 세션을 버립니다 (연습 화면에서 나가기).
    pub async fn exit(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id).map(|_| ()).ok_or(AppError::NotFound)
    }

    /// 모든 세션에 체크 표시 변경을 반영합니다. 갱신된 세션 수를 반환.
    pub async fn apply_checked(&self, sentence_id: i64, value: bool) -> usize {
        let mut sessions = self.sessions.write().await;
        sessions
            .values_mut()
            .map(|s| s.apply_checked(sentence_id, value))
            .filter(|&hit| hit)
            .count()
    }

    /// 모든 세션에서 삭제된 예문을 제거합니다. 영향을 받은 세션 수를 반환.
    pub async fn remove_by_id(&self, sentence_id: i64) -> usize {
        let mut sessions = self.sessions.write().await;
        sessions
            .values_mut()
            .map(|s| s.remove_by_id(sentence_id))
            .filter(|&hit| hit)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;
    use tokio::sync::oneshot;

    fn sentence(id: i64) -> SentencePair {
        SentencePair {
            id,
            japanese: format!("文{id}"),
            english: format!("Sentence {id}"),
            is_checked: false,
            created_at: "2026-10-19T00:00:00.000Z".to_string(),
        }
    }

    fn three() -> Vec<SentencePair> {
        vec![sentence(1), sentence(2), sentence(3)]
    }

    async fn start(
        manager: &PracticeManager,
        sentences: Vec<SentencePair>,
    ) -> Result<PracticeView, AppError> {
        manager.start(async move { Ok(sentences) }).await
    }

    fn ids(session: &PracticeSession) -> Vec<i64> {
        session.queue().iter().map(|s| s.id).collect()
    }

    /// 셔플 결과와 무관하게 큐 순서를 알 수 있도록 id 순서로 정렬한 세션
    fn ordered_session() -> PracticeSession {
        let mut session = PracticeSession::start(three()).unwrap();
        session.queue.sort_by_key(|s| s.id);
        session
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            PracticeSession::start(Vec::new()).unwrap_err(),
            PracticeError::EmptyQueue
        );
    }

    #[test]
    fn queue_is_a_permutation_of_input() {
        let session = PracticeSession::start(three()).unwrap();
        let mut queued = ids(&session);
        assert_eq!(queued.len(), 3);
        queued.sort_unstable();
        assert_eq!(queued, vec![1, 2, 3]);
        assert_eq!(session.position(), 0);
        assert!(!session.revealed());
    }

    #[test]
    fn every_permutation_is_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..600 {
            let session = PracticeSession::start_with_rng(three(), &mut rng).unwrap();
            seen.insert(ids(&session));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn advance_walks_to_the_end() {
        let mut session = PracticeSession::start(three()).unwrap();

        session.reveal().unwrap();
        assert_eq!(session.advance(), Advance::Continuing);
        assert!(!session.revealed());
        assert_eq!(session.position(), 1);

        session.reveal().unwrap();
        assert_eq!(session.advance(), Advance::Continuing);
        assert!(!session.revealed());
        assert_eq!(session.position(), 2);

        assert_eq!(session.advance(), Advance::SessionEnded);
        assert_eq!(session.position(), 2);
        assert!(session.is_ended());
        assert_eq!(session.current().unwrap_err(), PracticeError::SessionEnded);
        assert_eq!(session.reveal().unwrap_err(), PracticeError::SessionEnded);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut session = PracticeSession::start(three()).unwrap();
        session.reveal().unwrap();
        session.reveal().unwrap();
        assert!(session.revealed());
        assert!(session.view().card.unwrap().english.is_some());
    }

    #[test]
    fn answer_hidden_until_revealed() {
        let session = PracticeSession::start(three()).unwrap();
        let view = session.view();
        assert_eq!(view.total, 3);
        assert!(view.card.unwrap().english.is_none());
    }

    #[test]
    fn apply_checked_updates_queue_entry() {
        let mut session = PracticeSession::start(three()).unwrap();
        assert!(session.apply_checked(2, true));
        assert!(!session.apply_checked(99, true));
        let entry = session.queue().iter().find(|s| s.id == 2).unwrap();
        assert!(entry.is_checked);
        assert_eq!(session.queue().len(), 3);
    }

    #[test]
    fn removing_earlier_card_keeps_current_card() {
        let mut session = ordered_session();
        session.advance();
        session.reveal().unwrap();

        assert!(session.remove_by_id(1));
        assert_eq!(session.position(), 0);
        assert_eq!(session.current().unwrap().id, 2);
        assert!(session.revealed());
    }

    #[test]
    fn removing_current_card_skips_forward() {
        let mut session = ordered_session();
        session.reveal().unwrap();

        assert!(session.remove_by_id(1));
        assert_eq!(session.position(), 0);
        assert_eq!(session.current().unwrap().id, 2);
        assert!(!session.revealed());
        assert!(!session.is_ended());
    }

    #[test]
    fn removing_last_current_card_ends_session() {
        let mut session = ordered_session();
        session.advance();
        session.advance();

        assert!(session.remove_by_id(3));
        assert!(session.is_ended());
        assert_eq!(session.position(), 1);
        assert_eq!(session.queue().len(), 2);
    }

    #[test]
    fn removing_every_card_ends_session() {
        let mut session = ordered_session();
        for id in 1..=3 {
            assert!(session.remove_by_id(id));
        }
        assert!(session.is_ended());
        assert!(session.view().card.is_none());
        assert!(!session.remove_by_id(1));
    }

    #[tokio::test]
    async fn manager_tracks_sessions_by_id() {
        let manager = PracticeManager::default();
        let view = start(&manager, three()).await.unwrap();
        let id = view.session_id;

        let revealed = manager.reveal(id).await.unwrap();
        assert!(revealed.revealed);

        let step = manager.advance(id).await.unwrap();
        assert_eq!(step.outcome, Advance::Continuing);
        assert!(!step.view.revealed);

        manager.exit(id).await.unwrap();
        assert!(matches!(manager.view(id).await, Err(AppError::NotFound)));
        assert!(matches!(manager.exit(id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn manager_rejects_empty_queue() {
        let manager = PracticeManager::default();
        let err = start(&manager, Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Practice(PracticeError::EmptyQueue)));
    }

    #[tokio::test]
    async fn manager_mirrors_changes_into_every_session() {
        let manager = PracticeManager::default();
        let first = start(&manager, three()).await.unwrap().session_id;
        let second = start(&manager, vec![sentence(2)]).await.unwrap().session_id;

        assert_eq!(manager.apply_checked(2, true).await, 2);
        assert_eq!(manager.apply_checked(3, true).await, 1);

        assert_eq!(manager.remove_by_id(2).await, 2);
        assert_eq!(manager.view(first).await.unwrap().total, 2);
        let emptied = manager.view(second).await.unwrap();
        assert!(emptied.ended);
        assert_eq!(emptied.total, 0);
    }

    #[tokio::test]
    async fn failed_load_registers_nothing() {
        let manager = PracticeManager::default();
        let err = manager
            .start(async { Err(AppError::Internal("list failed".into())) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(manager.remove_by_id(1).await, 0);
    }

    #[tokio::test]
    async fn delete_after_listing_reaches_the_new_session() {
        let manager = PracticeManager::default();
        let (listed_tx, listed_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        // 목록을 읽은 직후 멈춰 있는 세션 시작
        let starting = {
            let manager = manager.clone();
            tokio::spawn(async move {
                manager
                    .start(async move {
                        let snapshot = three();
                        listed_tx.send(()).ok();
                        release_rx.await.ok();
                        Ok(snapshot)
                    })
                    .await
            })
        };
        listed_rx.await.unwrap();

        // 그 사이에 DB 삭제가 끝나고 세션 반영이 시작됨
        let removing = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.remove_by_id(2).await })
        };
        tokio::task::yield_now().await;
        release_tx.send(()).unwrap();

        let view = starting.await.unwrap().unwrap();
        assert_eq!(removing.await.unwrap(), 1);
        let current = manager.view(view.session_id).await.unwrap();
        assert_eq!(current.total, 2);
    }

    #[test]
    fn stale_sessions_expire() {
        let session = PracticeSession::start(three()).unwrap();
        let later = Utc::now() + Duration::hours(SESSION_TTL_HOURS + 1);
        assert!(session.is_expired(later));
        assert!(!session.is_expired(Utc::now()));
    }
}
