use rand::seq::SliceRandom;
use rand::Rng;

/// Number of tips shown at a time
pub const TIPS_SHOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipCategory {
    Productivity,
    Wellness,
    Strategy,
}

impl TipCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TipCategory::Productivity => "productivity",
            TipCategory::Wellness => "wellness",
            TipCategory::Strategy => "strategy",
        }
    }
}

/// A short piece of planning advice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
    pub category: TipCategory,
}

pub const TIPS: [Tip; 8] = [
    Tip {
        title: "Use the Two-Minute Rule",
        description: "If a task takes less than two minutes, do it immediately. This prevents small tasks from piling up.",
        category: TipCategory::Productivity,
    },
    Tip {
        title: "Eat the Frog First",
        description: "Tackle your most challenging or important task at the start of your day when energy is highest.",
        category: TipCategory::Strategy,
    },
    Tip {
        title: "Batch Similar Tasks",
        description: "Group similar tasks together to minimize context switching and maximize focus.",
        category: TipCategory::Productivity,
    },
    Tip {
        title: "The 80/20 Rule",
        description: "Focus on the 20% of tasks that will generate 80% of your results. Prioritize ruthlessly.",
        category: TipCategory::Strategy,
    },
    Tip {
        title: "Take Regular Breaks",
        description: "Work in focused blocks (25 min work, 5 min break) to keep performance up throughout the day.",
        category: TipCategory::Wellness,
    },
    Tip {
        title: "Break Down Big Tasks",
        description: "Divide large projects into smaller, actionable steps so progress feels tangible instead of overwhelming.",
        category: TipCategory::Strategy,
    },
    Tip {
        title: "Time Block Your Calendar",
        description: "Reserve specific hours for different kinds of work so important tasks get dedicated focus time.",
        category: TipCategory::Productivity,
    },
    Tip {
        title: "Review and Reflect Daily",
        description: "Spend 5 minutes each evening reviewing what you accomplished and planning tomorrow's priorities.",
        category: TipCategory::Strategy,
    },
];

/// Up to `count` distinct tips in random order
pub fn pick_tips<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Tip> {
    TIPS.choose_multiple(rng, count).copied().collect()
}

/// A fresh random selection of [`TIPS_SHOWN`] tips
pub fn random_tips() -> Vec<Tip> {
    pick_tips(&mut rand::thread_rng(), TIPS_SHOWN)
}
