//! Side-effect commands emitted by the core.
//!
//! Update functions never talk to a screen or a speaker; they return a list
//! of `Effect`s which the host hands to an [`EffectSink`] in order.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Shoot,
    Hit,
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    PlaySound(Cue),
    SetScoreText(String),
    SetHighScoreText(String),
    SetInstructions(String),
    SetGameplayHint(String),
}

/// Host-side collaborator receiving audio and text updates.
pub trait EffectSink {
    fn play(&mut self, cue: Cue);
    fn set_score_text(&mut self, text: &str);
    fn set_high_score_text(&mut self, text: &str);
    fn set_instructions(&mut self, text: &str);
    fn set_gameplay_hint(&mut self, text: &str);
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn high_score_text(high_score: u32) -> String {
    format!("High Score: {}", high_score)
}

/// Feed `effects` to `sink` in emission order.
pub fn dispatch<S: EffectSink + ?Sized>(effects: &[Effect], sink: &mut S) {
    for effect in effects {
        match effect {
            Effect::PlaySound(cue) => sink.play(*cue),
            Effect::SetScoreText(s) => sink.set_score_text(s),
            Effect::SetHighScoreText(s) => sink.set_high_score_text(s),
            Effect::SetInstructions(s) => sink.set_instructions(s),
            Effect::SetGameplayHint(s) => sink.set_gameplay_hint(s),
        }
    }
}
