//! Built-in roast pools and generation prompts.
//!
//! Voice: dry Irish pub wit. Never cruel, but has teeth.

use crate::{FeedbackTable, FeedbackTableError, FeedbackTier, PubTier, Template};

const PERFECT: &[&str] = &[
    "That's the one. Frame it.",
    "This is what we came here for.",
    "The barman nods.",
    "That'll do nicely.",
    "Textbook execution.",
    "You've done this before, haven't you.",
    "As it should be.",
    "That's going on the fridge.",
    "Fair play.",
    "{distance_mm}mm off. Splitting hairs at this point.",
    "Screenshot that. 🎯",
    "Your round's earned.",
    "That'll play.",
    "The G rests easy.",
    "Clinic.",
    "Your da would be proud.",
    "The stuff of legend.",
    "{distance_mm}mm. Drink up. You've earned it.",
    "The pint you show the grandkids.",
    "One for the ages.",
];

const SOLID_HIGH: &[&str] = &[
    "Not bad for a Tuesday.",
    "The G is satisfied. Not impressed.",
    "You can tell people you split it.",
    "{distance_mm}mm from glory.",
    "Close enough for government work.",
    "Won't be telling the grandkids about this one.",
    "{distance_mm}mm. Blame the lighting.",
    "{distance_mm}mm off. Blame the stool.",
    "Wouldn't frame it.",
    "We've seen worse. Not many, but some.",
];

const SOLID_LOW: &[&str] = &[
    "Your ma would be proud. Your da less so.",
    "Wouldn't show the lads.",
    "I remember my first pint.",
    "Tourist numbers.",
    "{distance_mm}mm. Heavy night?",
    "First time?",
    "That's certainly a choice.",
    "{distance_mm}mm. Keep this between you and God.",
    "Sunday league split.",
    "{distance_mm}mm. The luck of the Irish skipped you.",
];

const MID_HIGH: &[&str] = &[
    "Jury's still out.",
    "Interesting approach. Wrong, but interesting.",
    "The G remains unsplit.",
    "Off by {distance_mm}mm. Gotta get back to basics.",
    "Not one for the books.",
    "Your heart wasn't in it.",
    "Were you rushing?",
    "Not your day.",
    "{distance_mm}mm. Sleep it off.",
    "Ah. Right. Well.",
];

const MID_LOW: &[&str] = &[
    "Mediocre. Efficiently mediocre.",
    "Right down the middle. Of nowhere.",
    "Try again. Sober, maybe. 🤷",
    "The split of someone who gives up easily.",
    "Wouldn't show the lads. Wouldn't show anyone.",
    "{distance_mm}mm. You peaked in secondary school, didn't you.",
    "Proof that confidence isn't everything.",
    "The split of a man with a 3-star Uber rating.",
    "{distance_mm}mm. Next round's on you.",
    "The G's seen things. Now this.",
];

const ROUGH: &[&str] = &[
    "{distance_mm}mm. Your ancestors crossed an ocean for this?",
    "{distance_mm}mm. This is why she has the password.",
    "Have you considered switching to lager?",
    "Let's pretend this didn't happen.",
    "Delete that.",
    "{distance_mm}mm. That's not a split, that's a guess.",
    "Off by {distance_mm}mm. Were you aiming for the harp?",
    "That's going in the group chat. 📸",
    "Did the glass move?",
    "Have you considered darts instead?",
    "Your da's disappointed. Again.",
    "This is why you're not in the family photos.",
    "Genuinely impressive. In the wrong direction.",
    "The split of a man with no health insurance.",
    "{distance_mm}mm. Deported.",
    "{distance_mm}mm. The pint's filing for divorce.",
    "The split of a man who replies 'k'.",
    "Even the stool's uncomfortable.",
    "{distance_mm}mm. They're talking about you. Not well.",
    "{distance_mm}mm. Retire.",
];

const CRIMINAL: &[&str] = &[
    "What happened here.",
    "Banned from the premises. Effective immediately.",
    "Have a word with yourself.",
    "Speechless.",
    "{distance_mm}mm. This one stays between us and God.",
    "Was this intentional?",
    "Did you close your eyes?",
    "{distance_mm}mm off. That's not a split, that's a crime.",
    "The barman looked away. 😬",
    "This is why they hide the Guinness from you.",
    "The glass is pressing charges.",
    "{distance_mm}mm. Excommunicated.",
    "{distance_mm}mm. Arthur Guinness just rolled over.",
    "{distance_mm}mm. Leave the pub. Leave the country.",
    "{distance_mm}mm. A crime against the state.",
    "This is why your da stopped coming to matches.",
    "{distance_mm}mm short. You've heard that before.",
    "{distance_mm}mm short. Nothing new for you.",
    "{distance_mm}mm. The kind of miss that echoes.",
    "The G weeps.",
];

/// Tier names, bounds and pools, lowest first.
const SPLIT_TIERS: [(&str, f64, f64, &[&str]); 7] = [
    ("criminal", 0.0, 25.0, CRIMINAL),
    ("rough", 25.0, 50.0, ROUGH),
    ("mid_low", 50.0, 65.0, MID_LOW),
    ("mid_high", 65.0, 75.0, MID_HIGH),
    ("solid_low", 75.0, 85.0, SOLID_LOW),
    ("solid_high", 85.0, 90.0, SOLID_HIGH),
    ("perfect", 90.0, f64::INFINITY, PERFECT),
];

/// The built-in seven-tier split feedback table.
///
/// # Errors
/// Never fails for the built-in data; the `Result` carries validation of the
/// same path custom tables take.
pub fn default_table() -> Result<FeedbackTable, FeedbackTableError> {
    let tiers = SPLIT_TIERS
        .iter()
        .map(|(name, lower, upper, pool)| {
            FeedbackTier::new(
                *name,
                *lower,
                *upper,
                pool.iter().copied().map(Template::from).collect(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    FeedbackTable::new(tiers)
}

const SPLIT_PROMPT: &str = r#"You are The Digital Barman. You've pulled 10,000 pints. You've seen every split attempt imaginable. You're dry, deadpan, Irish pub wit. You say it once, mean it, move on. No sass. No explaining the joke. Conservative energy.

This is about SPLITTING THE G — how well the beer line aligns with the G on a Guinness glass. Not pouring technique.

Score: {score}%
Distance from perfect split: {distance_mm}mm
Beer line inside the target zone: {zone_entered}

Generate ONE verdict. 5-12 words. Match the tier:

PERFECT (90-100%): Understated respect. Earned.
- "That's the one. Frame it."
- "Your da would be proud."
- "Clinic."

SOLID HIGH (85-89%): Backhanded praise. Almost.
- "Not bad for a Tuesday."
- "You can tell people you split it."
- "Close enough for government work."

SOLID LOW (75-84%): Light roasting. You tried.
- "Your ma would be proud. Your da less so."
- "I remember my first pint."
- "Tourist numbers."

MID HIGH (65-74%): Dry observation. Not great.
- "Jury's still out."
- "Your heart wasn't in it."
- "Not your day."

MID LOW (50-64%): Starting to sting. Actually bad.
- "The split of a man with a 3-star Uber rating."
- "Proof that confidence isn't everything."
- "The split of someone who gives up easily."

ROUGH (25-49%): Real roasts. Teeth.
- "This is why you're not in the family photos."
- "The split of a man with no health insurance."
- "{distance}mm. The pint's filing for divorce."

CRIMINAL (0-24%): Maximum devastation.
- "This is why your da stopped coming to matches."
- "{distance}mm short. You've heard that before."
- "The glass is pressing charges."

Rules:
- Period at the end.
- One emoji max. Most have none. Dad energy only.
- Reference distance if it's funnier.
- Roast the split, not the person directly. But sting on bad scores.
- Never say "pour" — it's about the split/line/G.
- No lazy one-worders. Substance.
- Dry Irish wit. Dark and cheeky is fine. Not sassy. Not try-hard.
- Family digs land (da, ma, ancestors).
- If it sounds like a greeting card, delete it.

Your verdict:"#;

/// Prompt asking the text generator for one split verdict.
///
/// The distance is formatted to one decimal place.
#[must_use]
pub fn split_prompt(score: f64, distance_mm: f64, zone_entered: bool) -> String {
    SPLIT_PROMPT
        .replace("{score}", &score.to_string())
        .replace("{distance_mm}", &format!("{distance_mm:.1}"))
        .replace("{zone_entered}", if zone_entered { "yes" } else { "no" })
}

/// Built-in pub roast pool for `tier`.
#[must_use]
pub const fn pub_pool(tier: PubTier) -> &'static [&'static str] {
    match tier {
        PubTier::Top => &[
            "Found your local.",
            "This pub gets it.",
            "Pull up a stool and stay.",
            "The Guinness here has a pension plan.",
        ],
        PubTier::Solid => &[
            "Decent spot.",
            "Would drink again.",
            "A pub that knows its business.",
            "The barman's earned his tips.",
        ],
        PubTier::Mid => &[
            "It's a pub.",
            "Nothing special.",
            "Fine. Just fine.",
            "A pint was served. Technically.",
        ],
        PubTier::Rough => &[
            "Tourist trap energy.",
            "Why did you stay.",
            "The lines need cleaning.",
            "Drink up and move on.",
        ],
        PubTier::Bottom => &[
            "Never again.",
            "A crime scene.",
            "Call the authorities.",
            "The pint deserved better.",
        ],
    }
}

/// Prompt asking the text generator for one pub roast.
#[must_use]
pub fn pub_prompt(rating: &crate::PubRating, tier: PubTier) -> String {
    let tier_name = tier.as_str();
    format!(
        "You're The Digital Barman - sharp, witty, brutally honest. Judge this pub experience:

Overall: {overall}/5 stars
Taste: {taste}/5
Temperature: {temperature}/5
Head: {head}/5
Pub: {pub_name}
Tier: {tier_name}

Generate ONE punchy roast/compliment about the pub (max 8 words). Match the {tier_name} tier vibe - be authentic and sharp, not forced. Use an emoji only if it fits naturally.

Your style examples:
- Top tier: \"Found your local\" / \"This pub gets it\"
- Solid: \"Decent spot\" / \"Would drink again\"
- Mid: \"It's a pub\" / \"Nothing special\"
- Rough: \"Tourist trap energy\" / \"Why did you stay\"
- Bottom: \"Never again\" / \"A crime scene\"

Your response:",
        overall = rating.overall,
        taste = rating.taste,
        temperature = rating.temperature,
        head = rating.head,
        pub_name = rating.pub_name,
    )
}
