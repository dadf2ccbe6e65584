//! The debate orchestrator
//!
//! Drives a debate through its phases. Every operation follows the same
//! shape: load the record, rehydrate the sessions it needs, run the model
//! exchanges sequentially, then persist all appends in one terminal write.
//! Storage is never held across a model call, and a model failure aborts
//! the operation before anything reaches the store.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use rostrum_core::{Debate, LogEntry, Phase, Side, Speaker, Winner};
use rostrum_llm::{ChatBackend, ChatSession, LlmError};
use rostrum_persist::{DebateStore, DebateUpdate, NewDebate, StorageError, UserStore};

use crate::prompts;
use crate::verdict;

/// Errors from debate orchestration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Topic is required")]
    MissingTopic,
    #[error("Question is required")]
    MissingQuestion,
    #[error("Debate not found")]
    DebateNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Debate not started")]
    DebateNotStarted,
    #[error("Debate already judged")]
    AlreadyJudged,
    #[error("No debate logs found")]
    EmptyTranscript,
    #[error("Invalid judgment received from model: {0}. Expected 'pro' or 'con'.")]
    InvalidJudgment(String),
    #[error(transparent)]
    Backend(#[from] LlmError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of starting a debate.
#[derive(Debug)]
pub struct StartedDebate {
    pub debate_id: i64,
    pub topic: String,
    pub pro_initial: String,
    pub con_initial: String,
    pub logs: Vec<LogEntry>,
}

/// Result of one question/rebuttal round.
#[derive(Debug)]
pub struct TurnOutcome {
    pub question: String,
    pub pro_side_response: String,
    pub con_side_response: String,
    pub pro_side_rebuttal: String,
    pub con_side_rebuttal: String,
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
}

/// Result of the closing phase.
#[derive(Debug)]
pub struct ClosingOutcome {
    pub pro_closing: String,
    pub con_closing: String,
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
}

/// Result of judging.
#[derive(Debug)]
pub struct JudgmentOutcome {
    pub judgment: Winner,
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
}

/// The debate orchestration state machine.
#[derive(Clone)]
pub struct DebateEngine {
    debates: DebateStore,
    users: UserStore,
    backend: Arc<dyn ChatBackend>,
    max_sentences: u32,
}

impl DebateEngine {
    pub fn new(
        debates: DebateStore,
        users: UserStore,
        backend: Arc<dyn ChatBackend>,
        max_sentences: u32,
    ) -> Self {
        Self {
            debates,
            users,
            backend,
            max_sentences,
        }
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Rebuild a side's live session from the stored record.
    ///
    /// The system instruction is a pure function of fields already on the
    /// debate, so it cannot drift from the recorded topic.
    fn rehydrate(&self, debate: &Debate, side: Side) -> ChatSession {
        ChatSession::new(
            self.backend.clone(),
            prompts::stance_instruction(side, &debate.topic, self.max_sentences),
            debate.history_for(side).to_vec(),
        )
    }

    async fn load(&self, debate_id: i64) -> Result<Debate, EngineError> {
        self.debates
            .find_by_id(debate_id)
            .await?
            .ok_or(EngineError::DebateNotFound)
    }

    /// Start a debate: fresh sessions, opening statements from both sides,
    /// one `create` persisting the framing plus both openings.
    pub async fn start(&self, user_id: i64, topic: &str) -> Result<StartedDebate, EngineError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(EngineError::MissingTopic);
        }

        let mut pro = ChatSession::new(
            self.backend.clone(),
            prompts::stance_instruction(Side::Pro, topic, self.max_sentences),
            Vec::new(),
        );
        let mut con = ChatSession::new(
            self.backend.clone(),
            prompts::stance_instruction(Side::Con, topic, self.max_sentences),
            Vec::new(),
        );

        let opening = prompts::opening_statement(topic);
        let pro_initial = pro.send(opening.clone()).await?;
        let con_initial = con.send(opening).await?;

        let logs = vec![
            LogEntry::moderator(Phase::OpeningStatement, prompts::moderator_framing(topic)),
            LogEntry::new(Speaker::Pro, Phase::OpeningStatement, pro_initial.clone()),
            LogEntry::new(Speaker::Con, Phase::OpeningStatement, con_initial.clone()),
        ];

        let debate = self
            .debates
            .create(NewDebate {
                user_id,
                topic: topic.to_string(),
                logs,
                pro_history: pro.export_history(),
                con_history: con.export_history(),
            })
            .await?;

        info!(debate_id = debate.id, topic = %debate.topic, "Debate started");

        Ok(StartedDebate {
            debate_id: debate.id,
            topic: debate.topic,
            pro_initial,
            con_initial,
            logs: debate.transcript,
        })
    }

    /// One question/rebuttal round.
    ///
    /// Sub-calls run in a fixed order: pro answers, con answers, pro rebuts
    /// con's answer, con rebuts pro's answer. Rebuttal prompts embed the
    /// opponent's just-produced answer, so the order is not interchangeable.
    /// All five log entries and the question commit in a single write; a
    /// failed call after the first leaves storage untouched.
    pub async fn process_turn(
        &self,
        debate_id: i64,
        question: &str,
    ) -> Result<TurnOutcome, EngineError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(EngineError::MissingQuestion);
        }

        let mut debate = self.load(debate_id).await?;
        if !debate.is_started() {
            return Err(EngineError::DebateNotStarted);
        }

        let mut pro = self.rehydrate(&debate, Side::Pro);
        let mut con = self.rehydrate(&debate, Side::Con);

        let pro_side_response = pro
            .send(prompts::question_prompt(Side::Pro, question, self.max_sentences))
            .await?;
        let con_side_response = con
            .send(prompts::question_prompt(Side::Con, question, self.max_sentences))
            .await?;

        debate.transcript.push(LogEntry::moderator(
            Phase::InitialQuestionResponse,
            question,
        ));
        debate.transcript.push(LogEntry::new(
            Speaker::Pro,
            Phase::InitialQuestionResponse,
            pro_side_response.clone(),
        ));
        debate.transcript.push(LogEntry::new(
            Speaker::Con,
            Phase::InitialQuestionResponse,
            con_side_response.clone(),
        ));

        let pro_side_rebuttal = pro
            .send(prompts::rebuttal_prompt(
                Side::Con,
                &con_side_response,
                self.max_sentences,
            ))
            .await?;
        let con_side_rebuttal = con
            .send(prompts::rebuttal_prompt(
                Side::Pro,
                &pro_side_response,
                self.max_sentences,
            ))
            .await?;

        debate.transcript.push(LogEntry::new(
            Speaker::Pro,
            Phase::Rebuttal,
            pro_side_rebuttal.clone(),
        ));
        debate.transcript.push(LogEntry::new(
            Speaker::Con,
            Phase::Rebuttal,
            con_side_rebuttal.clone(),
        ));
        debate.questions.push(question.to_string());
        debate.pro_history = pro.export_history();
        debate.con_history = con.export_history();

        self.debates
            .update(debate.id, &DebateUpdate::from(&debate))
            .await?;

        info!(debate_id = debate.id, question = %question, "Turn processed");

        Ok(TurnOutcome {
            question: question.to_string(),
            pro_side_response,
            con_side_response,
            pro_side_rebuttal,
            con_side_rebuttal,
            logs: debate.transcript,
            questions: debate.questions,
        })
    }

    /// Closing arguments from both sides, then transition to `Closed`.
    pub async fn closing_arguments(&self, debate_id: i64) -> Result<ClosingOutcome, EngineError> {
        let mut debate = self.load(debate_id).await?;
        if !debate.is_started() {
            return Err(EngineError::DebateNotStarted);
        }

        let mut pro = self.rehydrate(&debate, Side::Pro);
        let mut con = self.rehydrate(&debate, Side::Con);

        let closing = prompts::closing_prompt(self.max_sentences);
        let pro_closing = pro.send(closing.clone()).await?;
        let con_closing = con.send(closing).await?;

        debate.transcript.push(LogEntry::moderator(
            Phase::ClosingArgument,
            prompts::closing_framing(),
        ));
        debate.transcript.push(LogEntry::new(
            Speaker::Pro,
            Phase::ClosingArgument,
            pro_closing.clone(),
        ));
        debate.transcript.push(LogEntry::new(
            Speaker::Con,
            Phase::ClosingArgument,
            con_closing.clone(),
        ));
        debate.pro_history = pro.export_history();
        debate.con_history = con.export_history();

        self.debates
            .update(debate.id, &DebateUpdate::from(&debate))
            .await?;

        info!(debate_id = debate.id, "Closing arguments processed");

        Ok(ClosingOutcome {
            pro_closing,
            con_closing,
            logs: debate.transcript,
            questions: debate.questions,
        })
    }

    /// Judge the debate: one non-conversational generation over the full
    /// transcript, normalized into a binary verdict. The winner is set once;
    /// re-judging is rejected.
    pub async fn judge(&self, debate_id: i64) -> Result<JudgmentOutcome, EngineError> {
        let mut debate = self.load(debate_id).await?;
        if !debate.is_started() {
            return Err(EngineError::DebateNotStarted);
        }
        if debate.transcript.is_empty() {
            return Err(EngineError::EmptyTranscript);
        }
        if debate.is_judged() {
            return Err(EngineError::AlreadyJudged);
        }

        let transcript_json = serde_json::to_string(&debate.transcript)
            .map_err(|e| EngineError::Storage(StorageError::Serialization(e.to_string())))?;

        let raw = self
            .backend
            .generate(
                &prompts::judge_system_instruction(),
                &prompts::judge_prompt(&debate.topic, &transcript_json),
            )
            .await?;

        let judgment =
            verdict::normalize(&raw).ok_or_else(|| EngineError::InvalidJudgment(raw.clone()))?;

        debate.transcript.push(LogEntry::moderator(
            Phase::Narration,
            prompts::judgment_narration(),
        ));
        debate.transcript.push(LogEntry::moderator(
            Phase::Judgment,
            prompts::judgment_text(judgment),
        ));
        debate.winner = Some(judgment);

        self.debates
            .update(debate.id, &DebateUpdate::from(&debate))
            .await?;

        info!(debate_id = debate.id, winner = judgment.as_str(), "Debate judged");

        Ok(JudgmentOutcome {
            judgment,
            logs: debate.transcript,
            questions: debate.questions,
        })
    }

    /// Read-only view of one debate.
    pub async fn fetch(&self, debate_id: i64) -> Result<Debate, EngineError> {
        self.load(debate_id).await
    }

    /// Read-only view of all debates owned by a user.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Debate>, EngineError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(EngineError::UserNotFound);
        }
        Ok(self.debates.list_by_user(user_id).await?)
    }
}
