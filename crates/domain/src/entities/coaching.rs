//! Coaching message templates

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const REFLECTION_PROMPT: &str = "🤔 Time for reflection: How did today align with your future self? \
                                 What went well? What could you improve tomorrow?";

/// What we know about a coached user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingContext {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub habits: Vec<String>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_reflection: String,
    #[serde(default)]
    pub preferred_time: String,
    #[serde(default)]
    pub timezone: String,
}

/// The kinds of coaching nudges we send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachingMessageKind {
    DailyCheckin,
    GoalReminder,
    HabitReminder,
    ReflectionPrompt,
}

impl CoachingMessageKind {
    /// Render the message text for a user
    pub fn render(self, context: &CoachingContext) -> String {
        match self {
            Self::DailyCheckin => format!(
                "Hey there! 👋 How are you feeling today? Take a moment to check in with yourself. Remember your goals: {}",
                context.goals.join(", ")
            ),
            Self::GoalReminder => format!(
                "🎯 Future You reminder: You're working towards {}. What's one small step you can take today to move closer?",
                context.goals.join(" and ")
            ),
            Self::HabitReminder => format!(
                "💪 Habit check! You're on a {}-day streak with {}. Keep it up!",
                context.current_streak,
                context.habits.join(", ")
            ),
            Self::ReflectionPrompt => REFLECTION_PROMPT.to_string(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyCheckin => "daily_checkin",
            Self::GoalReminder => "goal_reminder",
            Self::HabitReminder => "habit_reminder",
            Self::ReflectionPrompt => "reflection_prompt",
        }
    }
}

impl fmt::Display for CoachingMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoachingMessageKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily_checkin" => Ok(Self::DailyCheckin),
            "goal_reminder" => Ok(Self::GoalReminder),
            "habit_reminder" => Ok(Self::HabitReminder),
            "reflection_prompt" => Ok(Self::ReflectionPrompt),
            other => Err(DomainError::UnknownCoachingKind(other.to_string())),
        }
    }
}
