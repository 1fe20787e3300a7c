/// A motivational line shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

const AUTHOR: &str = "Deep Work Principle";

pub const QUOTES: [Quote; 10] = [
    Quote { text: "The ability to perform deep work is becoming increasingly rare and valuable in our economy.", author: AUTHOR },
    Quote { text: "Clarity about what matters provides clarity about what does not.", author: AUTHOR },
    Quote { text: "Focus intensely without distraction on a cognitively demanding task to push your capabilities.", author: AUTHOR },
    Quote { text: "Schedule every minute of your day to protect time for what matters most.", author: AUTHOR },
    Quote { text: "Embrace boredom and resist the urge to check your phone during idle moments.", author: AUTHOR },
    Quote { text: "High-quality work produced equals time spent multiplied by intensity of focus.", author: AUTHOR },
    Quote { text: "Train your ability to concentrate by eliminating shallow obligations from your schedule.", author: AUTHOR },
    Quote { text: "Create rituals and routines to minimize friction when starting important work.", author: AUTHOR },
    Quote { text: "Say no to shallow commitments to say yes to deep, meaningful work.", author: AUTHOR },
    Quote { text: "Batch shallow tasks together and complete them in designated time blocks.", author: AUTHOR },
];

/// Quote at `index`, wrapping around
pub fn quote_at(index: usize) -> Quote {
    QUOTES[index % QUOTES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_at_wraps() {
        assert_eq!(quote_at(0), QUOTES[0]);
        assert_eq!(quote_at(QUOTES.len() + 2), QUOTES[2]);
    }
}
