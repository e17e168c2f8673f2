//! Rule-based noun lemmatizer.
//!
//! Reduces plural nouns to their dictionary base form using an irregular
//! table and a small set of suffix rules. Output is a fixed point:
//! `lemmatize(lemmatize(w)) == lemmatize(w)` for every input.

use super::tokenizer::is_stopword;

/// Lemmatize a single lowercase token.
pub fn lemmatize(word: &str) -> String {
    if let Some(base) = irregular(word) {
        return base.to_string();
    }
    if is_invariant(word) {
        return word.to_string();
    }
    let base = match reduce_plural(word) {
        Some(base) => base,
        None => return word.to_string(),
    };
    if let Some(irr) = irregular(&base) {
        return irr.to_string();
    }
    // A reduction that lands on a stop word ("dons" -> "don") would be
    // filtered on the next pass; keep the surface form instead.
    if is_stopword(&base) {
        return word.to_string();
    }
    base
}

fn reduce_plural(word: &str) -> Option<String> {
    // "ss", "us" and "is" endings are singular (class, bus, analysis).
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return Some(format!("{stem}ss"));
    }
    for suffix in ["xes", "ches", "shes", "zzes"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return Some(format!("{stem}{}", &suffix[..suffix.len() - 2]));
        }
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if is_ie_noun(stem) {
            return Some(format!("{stem}ie"));
        }
        if stem.chars().count() >= 2 {
            return Some(format!("{stem}y"));
        }
    }
    let stem = word.strip_suffix('s')?;
    if stem.chars().count() < 3 {
        return None;
    }
    Some(stem.to_string())
}

/// Plurals whose singular ends in "ie" rather than "y".
fn is_ie_noun(stem: &str) -> bool {
    matches!(
        stem,
        "mov" | "zomb" | "cook" | "rook" | "hipp" | "calor" | "prair" | "goal" | "brown"
            | "aunt" | "self" | "hood" | "sweet" | "pix" | "group" | "yupp" | "smooth"
            | "bog" | "boog" | "budd" | "gen" | "newb" | "eyr" | "cut"
    )
}

/// Words that end in "s" but are not plurals.
fn is_invariant(word: &str) -> bool {
    matches!(
        word,
        "news" | "series" | "species" | "means" | "lens" | "physics" | "politics"
            | "athletics" | "mathematics" | "economics" | "ethics" | "chaos" | "atlas"
            | "canvas" | "texas" | "jeans" | "pants" | "gas" | "yes" | "always"
            | "perhaps" | "whereas" | "thus" | "across" | "besides" | "towards"
            | "afterwards" | "sometimes" | "nevertheless" | "mars" | "paris"
            | "vegas" | "christmas" | "headquarters" | "aids"
    )
}

fn irregular(word: &str) -> Option<&'static str> {
    let base = match word {
        "children" => "child",
        "men" => "man",
        "women" => "woman",
        "people" => "person",
        "mice" => "mouse",
        "geese" => "goose",
        "feet" => "foot",
        "teeth" => "tooth",
        "oxen" => "ox",
        "wolves" => "wolf",
        "knives" => "knife",
        "wives" => "wife",
        "lives" => "life",
        "leaves" => "leaf",
        "thieves" => "thief",
        "halves" => "half",
        "selves" => "self",
        "shelves" => "shelf",
        "elves" => "elf",
        "dwarves" => "dwarf",
        "heroes" => "hero",
        "potatoes" => "potato",
        "tomatoes" => "tomato",
        "echoes" => "echo",
        "volcanoes" => "volcano",
        "torpedoes" => "torpedo",
        "mosquitoes" => "mosquito",
        "buses" => "bus",
        "gases" => "gas",
        "lenses" => "lens",
        "bonuses" => "bonus",
        "viruses" => "virus",
        "campuses" => "campus",
        "circuses" => "circus",
        "statuses" => "status",
        "octopuses" => "octopus",
        "atlases" => "atlas",
        "canvases" => "canvas",
        "quizzes" => "quiz",
        "criteria" => "criterion",
        "phenomena" => "phenomenon",
        "crises" => "crisis",
        "analyses" => "analysis",
        "fungi" => "fungus",
        "cacti" => "cactus",
        "indices" => "index",
        "policemen" => "policeman",
        "firemen" => "fireman",
        "businessmen" => "businessman",
        "gentlemen" => "gentleman",
        "spokesmen" => "spokesman",
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_plurals() {
        assert_eq!(lemmatize("cats"), "cat");
        assert_eq!(lemmatize("houses"), "house");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("watches"), "watch");
        assert_eq!(lemmatize("dishes"), "dish");
        assert_eq!(lemmatize("classes"), "class");
    }

    #[test]
    fn ies_plurals() {
        assert_eq!(lemmatize("cities"), "city");
        assert_eq!(lemmatize("movies"), "movie");
        assert_eq!(lemmatize("zombies"), "zombie");
        assert_eq!(lemmatize("lies"), "lie");
    }

    #[test]
    fn single_s_stems_take_es() {
        assert_eq!(lemmatize("buses"), "bus");
        assert_eq!(lemmatize("gases"), "gas");
        assert_eq!(lemmatize("lenses"), "lens");
        assert_eq!(lemmatize("viruses"), "virus");
        assert_eq!(lemmatize("quizzes"), "quiz");
        assert_eq!(lemmatize("houses"), "house");
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("women"), "woman");
        assert_eq!(lemmatize("wolves"), "wolf");
        assert_eq!(lemmatize("heroes"), "hero");
    }

    #[test]
    fn singular_endings_untouched() {
        for w in ["boss", "bus", "analysis", "famous", "news", "series", "gas", "yes"] {
            assert_eq!(lemmatize(w), w);
        }
    }

    #[test]
    fn non_plurals_untouched() {
        for w in ["love", "hero", "day", "running", "1999"] {
            assert_eq!(lemmatize(w), w);
        }
    }

    #[test]
    fn stopword_reduction_keeps_surface() {
        assert_eq!(lemmatize("dons"), "dons");
    }

    #[test]
    fn fixed_point() {
        let words = [
            "cats", "houses", "boxes", "cities", "movies", "children", "mices", "buses",
            "glasses", "wolves", "heroes", "dons", "statuses", "flies", "dies", "ties",
            "gases", "lenses", "quizzes",
        ];
        for w in words {
            let once = lemmatize(w);
            assert_eq!(lemmatize(&once), once, "{w} -> {once} is not a fixed point");
        }
    }
}
