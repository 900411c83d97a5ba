use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::info;

use super::{BuilderError, BuilderResult};
use crate::classes::{
    CardexIndex, CardexPrinting, CompressedPrinting, PrintingImageUris, PrintingSet, ScryfallCard,
};
use crate::utils::{collector_number_numeric, normalize_card_name};

/// Set types whose printings count as promotional releases.
const PROMO_SET_TYPES: &[&str] = &[
    "from_the_vault",
    "spellbook",
    "memorabilia", // World Champs decks and CE/IE
    "box",         // all Secret Lairs
    "duel_deck",
    "premium_deck",
    "masterpiece",
];

/// Sets treated as promotional regardless of their flags.
const PROMO_SETS: &[&str] = &[
    "plist", // The List
    "mb1",   // non-Playtest Mystery Booster inclusions
    "sum",   // Summer Magic
];

/// Sets never treated as promotional, overriding every other signal.
const NOT_PROMO_SETS: &[&str] = &["phpr"];

/// Sets included no matter what the exclusion rules say.
const INCLUDED_SETS: &[&str] = &[
    "sunf", // Unfinity Sticker Sheets
];

/// Sets dropped from the index entirely.
const EXCLUDED_SETS: &[&str] = &["fbb", "4bb", "rin", "ren"];

const EXCLUDED_SET_TYPES: &[&str] = &["token"];

const EXCLUDED_LAYOUTS: &[&str] = &["token", "double_faced_token", "art_series"];

const REVERSIBLE_LAYOUT: &str = "reversible_card";

const CARD_IMAGE_URL: &str = "https://api.scryfall.com/cards";

/// Decide whether a raw record makes it into the index at all. Oversized
/// printings stay out unless they are planes, and the include list wins over
/// every exclusion.
pub fn is_included(card: &ScryfallCard) -> bool {
    INCLUDED_SETS.contains(&card.set.as_str())
        || ((!card.oversized || card.layout == "planar")
            && !EXCLUDED_SET_TYPES.contains(&card.set_type.as_str())
            && !EXCLUDED_LAYOUTS.contains(&card.layout.as_str())
            && !EXCLUDED_SETS.contains(&card.set.as_str()))
}

/// Split a reversible record into its two independent fronts: face fields
/// merged over the parent, collector numbers suffixed `a` and `b`, face list
/// cleared so the derived records read as single-faced. Every other layout
/// passes through untouched.
pub fn expand_reversible(card: ScryfallCard) -> BuilderResult<Vec<ScryfallCard>> {
    if card.layout != REVERSIBLE_LAYOUT {
        return Ok(vec![card]);
    }

    let faces = card.card_faces.clone().unwrap_or_default();
    if faces.len() < 2 {
        return Err(BuilderError::MalformedRecord {
            context: card.describe(),
            reason: format!("reversible card with {} faces", faces.len()),
        });
    }

    let expanded = faces
        .into_iter()
        .take(2)
        .zip(["a", "b"])
        .map(|(face, suffix)| {
            let mut derived = card.clone();
            derived.name = face.name;
            if face.oracle_id.is_some() {
                derived.oracle_id = face.oracle_id;
            }
            derived.collector_number = format!("{}{}", card.collector_number, suffix);
            derived.card_faces = None;
            derived
        })
        .collect();

    Ok(expanded)
}

/// Map one surviving record to its normalized printing.
pub fn project(card: &ScryfallCard) -> CardexPrinting {
    let faces = card.card_faces.as_deref().unwrap_or(&[]);

    // When the first face carries its own image the browser shows that face,
    // so its name becomes the display name.
    let display_name = match faces.first() {
        Some(face) if face.image_uris.is_some() => face.name.as_str(),
        _ => card.name.as_str(),
    };

    let back = faces
        .get(1)
        .filter(|face| face.image_uris.is_some())
        .map(|_| image_uri(&card.set, &card.collector_number, "back"));

    CardexPrinting {
        id: Some(card.id.clone()),
        oracle_id: card.oracle_id.clone(),
        oracle_name: Some(card.name.clone()),
        name: normalize_card_name(display_name),
        release_date: card.released_at.clone(),
        set: PrintingSet {
            name: card.set_name.clone(),
            code: card.set.clone(),
        },
        set_number: card.collector_number.clone(),
        is_digital: card.digital,
        is_promo: is_promo(card),
        image_uris: PrintingImageUris {
            front: image_uri(&card.set, &card.collector_number, "front"),
            back,
        },
    }
}

/// Promotional status: the explicit not-promo override wins, then any promo
/// signal counts.
fn is_promo(card: &ScryfallCard) -> bool {
    !NOT_PROMO_SETS.contains(&card.set.as_str())
        && (card.promo
            || card.promo_types.is_some()
            || PROMO_SET_TYPES.contains(&card.set_type.as_str())
            || PROMO_SETS.contains(&card.set.as_str()))
}

/// Deterministic cropped-image URL for one face of a printing. The fixed
/// query leaves out Scryfall's timestamp parameter so the artifact does not
/// churn week over week.
fn image_uri(set_code: &str, collector_number: &str, face: &str) -> String {
    format!(
        "{}/{}/{}?format=image&version=border_crop&face={}",
        CARD_IMAGE_URL, set_code, collector_number, face
    )
}

/// Load the pre-normalized supplemental catalog, already shaped as printings.
pub fn load_supplemental_printings(path: &Path) -> BuilderResult<Vec<CardexPrinting>> {
    let payload = fs::read_to_string(path)
        .map_err(|e| BuilderError::SupplementalError(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&payload)
        .map_err(|e| BuilderError::SupplementalError(format!("{}: {}", path.display(), e)))
}

/// The one synthetic entry every index carries: the site mascot, pinned to a
/// far-past release date with a static local image.
pub fn mascot_printing() -> CardexPrinting {
    CardexPrinting {
        id: None,
        oracle_id: None,
        oracle_name: None,
        name: "griselbrand".to_string(),
        release_date: "1990-01-01".to_string(),
        set: PrintingSet {
            name: "Griselbrand.com".to_string(),
            code: "Griselbrand.com".to_string(),
        },
        set_number: "1".to_string(),
        is_digital: false,
        is_promo: false,
        image_uris: PrintingImageUris {
            front: "/avr-106-griselbrand.jpg".to_string(),
            back: None,
        },
    }
}

/// Canonical order across all printings: release date first, then the
/// numeric part of the collector number, then the full collector number
/// lexically. Collector numbers are not pure integers (alternate arts carry
/// suffixes like "218a"), so naive string or numeric comparison misorders
/// them, 218a landing before 60 and the like.
///
/// An unparseable release date is a deterministic sentinel ordering before
/// every valid date; a collector number without digits likewise orders
/// before every numeric one. Exact ties compare equal and keep their append
/// order under the stable sort.
pub fn compare_printings(a: &CardexPrinting, b: &CardexPrinting) -> Ordering {
    parse_release_date(&a.release_date)
        .cmp(&parse_release_date(&b.release_date))
        .then_with(|| {
            collector_number_numeric(&a.set_number).cmp(&collector_number_numeric(&b.set_number))
        })
        .then_with(|| a.set_number.cmp(&b.set_number))
}

fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Run the whole pipeline over one raw catalog: classify, expand, project,
/// append the supplemental printings and the mascot, sort, reduce.
pub fn build_card_index(
    raw_cards: Vec<ScryfallCard>,
    supplemental: Vec<CardexPrinting>,
) -> BuilderResult<CardexIndex> {
    let mut printings = Vec::with_capacity(raw_cards.len() + supplemental.len() + 1);

    for card in raw_cards {
        if !is_included(&card) {
            continue;
        }
        for derived in expand_reversible(card)? {
            printings.push(project(&derived));
        }
    }
    info!("Projected {} printings from the primary catalog", printings.len());

    // Appended after the primary list; the comparator alone decides their
    // final position within a name group, append order only breaks ties.
    printings.extend(supplemental);
    printings.push(mascot_printing());

    printings.sort_by(compare_printings);

    build_index(printings)
}

/// Collapse the sorted printings into the final index in one pass, building
/// the name groups and the set lookup together.
pub fn build_index(printings: Vec<CardexPrinting>) -> BuilderResult<CardexIndex> {
    let mut index = CardexIndex::new();

    for printing in printings {
        let compressed = compress(&printing)?;
        index
            .cards
            .entry(printing.group_key())
            .or_default()
            .push(compressed);
        // The same code always maps to the same name in valid input, so the
        // overwrite is idempotent.
        index
            .sets
            .insert(printing.set.code.clone(), printing.set.name.clone());
    }

    Ok(index)
}

/// Wire form of one printing. A record that violates the printing invariants
/// fails the whole build by name rather than emitting a partially correct
/// group.
fn compress(printing: &CardexPrinting) -> BuilderResult<CompressedPrinting> {
    if printing.name.is_empty() {
        return Err(malformed(printing, "empty display name"));
    }
    if printing.set.code.is_empty() {
        return Err(malformed(printing, "empty set code"));
    }
    if printing.image_uris.front.is_empty() {
        return Err(malformed(printing, "missing front image"));
    }

    Ok(CompressedPrinting {
        s: format!("{}|{}", printing.set.code, printing.set_number),
        d: printing.is_digital.then_some(1),
        p: printing.is_promo.then_some(1),
        m: printing.is_multiface().then_some(1),
        f: printing.image_uris.front.clone(),
        b: printing.image_uris.back.clone(),
    })
}

fn malformed(printing: &CardexPrinting, reason: &str) -> BuilderError {
    BuilderError::MalformedRecord {
        context: printing.describe(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::ScryfallCardFace;

    fn raw(name: &str, set: &str, number: &str, released: &str) -> ScryfallCard {
        ScryfallCard {
            id: format!("{}-{}", set, number),
            oracle_id: Some(format!("oracle-{}", name)),
            name: name.to_string(),
            set: set.to_string(),
            set_name: format!("Set {}", set),
            collector_number: number.to_string(),
            released_at: released.to_string(),
            layout: "normal".to_string(),
            ..Default::default()
        }
    }

    fn printing(date: &str, number: &str) -> CardexPrinting {
        CardexPrinting {
            name: "test".to_string(),
            release_date: date.to_string(),
            set: PrintingSet {
                name: "Test".to_string(),
                code: "tst".to_string(),
            },
            set_number: number.to_string(),
            image_uris: PrintingImageUris {
                front: "front".to_string(),
                back: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_is_included_exclusions() {
        let mut card = raw("Island", "usg", "336", "1998-10-12");
        assert!(is_included(&card));

        card.set_type = "token".to_string();
        assert!(!is_included(&card));
        card.set_type = String::new();

        card.layout = "art_series".to_string();
        assert!(!is_included(&card));
        card.layout = "normal".to_string();

        card.set = "fbb".to_string();
        assert!(!is_included(&card));
    }

    #[test]
    fn test_is_included_oversized_planar_exception() {
        let mut card = raw("Academy at Tolaria West", "hop", "1", "2009-09-04");
        card.oversized = true;
        assert!(!is_included(&card));

        card.layout = "planar".to_string();
        assert!(is_included(&card));
    }

    #[test]
    fn test_is_included_override_beats_exclusions() {
        let mut card = raw("Sticker Sheet", "sunf", "1", "2022-10-07");
        card.oversized = true;
        card.set_type = "token".to_string();
        assert!(is_included(&card));
    }

    #[test]
    fn test_expand_reversible_yields_two_fronts() {
        let mut card = raw("Propaganda // Propaganda", "sld", "381", "2022-04-22");
        card.layout = "reversible_card".to_string();
        card.oracle_id = None;
        card.card_faces = Some(vec![
            ScryfallCardFace {
                name: "Propaganda".to_string(),
                oracle_id: Some("oracle-prop".to_string()),
                image_uris: Some(serde_json::json!({"border_crop": "x"})),
            },
            ScryfallCardFace {
                name: "Propaganda".to_string(),
                oracle_id: Some("oracle-prop".to_string()),
                image_uris: Some(serde_json::json!({"border_crop": "y"})),
            },
        ]);

        let expanded = expand_reversible(card).unwrap();
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].collector_number, "381a");
        assert_eq!(expanded[1].collector_number, "381b");
        assert!(expanded.iter().all(|c| c.card_faces.is_none()));
        assert!(expanded.iter().all(|c| c.name == "Propaganda"));
        assert!(expanded.iter().all(|c| c.oracle_id.is_some()));
    }

    #[test]
    fn test_expand_reversible_missing_faces_is_fatal() {
        let mut card = raw("Broken", "sld", "9", "2022-04-22");
        card.layout = "reversible_card".to_string();
        card.card_faces = None;

        let err = expand_reversible(card).unwrap_err();
        assert!(err.to_string().contains("Broken (sld) #9"));
    }

    #[test]
    fn test_expand_passes_other_layouts_through() {
        let card = raw("Abandon Hope", "tmp", "107", "1997-10-14");
        let expanded = expand_reversible(card).unwrap();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].collector_number, "107");
    }

    #[test]
    fn test_project_plain_card() {
        let card = raw("Abandon Hope", "tmp", "107", "1997-10-14");
        let printing = project(&card);

        assert_eq!(printing.name, "Abandon Hope");
        assert_eq!(printing.set.code, "tmp");
        assert_eq!(printing.set_number, "107");
        assert_eq!(
            printing.image_uris.front,
            "https://api.scryfall.com/cards/tmp/107?format=image&version=border_crop&face=front"
        );
        assert!(printing.image_uris.back.is_none());
        assert!(!printing.is_promo);
        assert!(!printing.is_digital);
    }

    #[test]
    fn test_project_face_aware_name_and_back_image() {
        let mut card = raw("Delver of Secrets // Insectile Aberration", "isd", "51", "2011-09-30");
        card.layout = "transform".to_string();
        card.card_faces = Some(vec![
            ScryfallCardFace {
                name: "Delver of Secrets".to_string(),
                oracle_id: None,
                image_uris: Some(serde_json::json!({"border_crop": "x"})),
            },
            ScryfallCardFace {
                name: "Insectile Aberration".to_string(),
                oracle_id: None,
                image_uris: Some(serde_json::json!({"border_crop": "y"})),
            },
        ]);

        let printing = project(&card);
        assert_eq!(printing.name, "Delver of Secrets");
        assert_eq!(
            printing.oracle_name.as_deref(),
            Some("Delver of Secrets // Insectile Aberration")
        );
        assert!(printing.is_multiface());
        assert_eq!(
            printing.image_uris.back.as_deref(),
            Some("https://api.scryfall.com/cards/isd/51?format=image&version=border_crop&face=back")
        );
    }

    #[test]
    fn test_project_faces_without_images_use_top_level_name() {
        // Adventures share one image, so the combined name stays
        let mut card = raw("Bonecrusher Giant // Stomp", "eld", "115", "2019-10-04");
        card.layout = "adventure".to_string();
        card.card_faces = Some(vec![
            ScryfallCardFace {
                name: "Bonecrusher Giant".to_string(),
                oracle_id: None,
                image_uris: None,
            },
            ScryfallCardFace {
                name: "Stomp".to_string(),
                oracle_id: None,
                image_uris: None,
            },
        ]);

        let printing = project(&card);
        assert_eq!(printing.name, "Bonecrusher Giant // Stomp");
        assert!(printing.image_uris.back.is_none());
        assert!(printing.is_multiface());
    }

    #[test]
    fn test_is_promo_signals() {
        let mut card = raw("Lightning Dragon", "pusg", "202", "1998-09-01");
        card.promo = true;
        assert!(project(&card).is_promo);

        let mut card = raw("Ajani", "plist", "1", "2020-09-26");
        assert!(project(&card).is_promo);
        card.set = "mb1".to_string();
        assert!(project(&card).is_promo);

        let mut card = raw("Mox", "v10", "1", "2010-08-27");
        card.set_type = "from_the_vault".to_string();
        assert!(project(&card).is_promo);

        let mut card = raw("Bear", "pxyz", "1", "2020-01-01");
        card.promo_types = Some(vec!["prerelease".to_string()]);
        assert!(project(&card).is_promo);
    }

    #[test]
    fn test_is_promo_override_wins() {
        let mut card = raw("Serra Angel", "phpr", "1", "1996-01-01");
        card.promo = true;
        card.promo_types = Some(vec!["mediainsert".to_string()]);
        assert!(!project(&card).is_promo);
    }

    #[test]
    fn test_compare_release_date_dominates() {
        let older = printing("1997-10-14", "300");
        let newer = printing("2014-06-16", "1");
        assert_eq!(compare_printings(&older, &newer), Ordering::Less);
        assert_eq!(compare_printings(&newer, &older), Ordering::Greater);
    }

    #[test]
    fn test_compare_numeric_part_beats_lexical() {
        // Plain string comparison would put "218a" before "60"
        let low = printing("2020-01-01", "60");
        let high = printing("2020-01-01", "218a");
        assert_eq!(compare_printings(&low, &high), Ordering::Less);
        assert_eq!(compare_printings(&high, &low), Ordering::Greater);
    }

    #[test]
    fn test_compare_lexical_fallback_on_numeric_tie() {
        let a = printing("2020-01-01", "218a");
        let b = printing("2020-01-01", "218b");
        assert_eq!(compare_printings(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_compare_unparseable_date_sorts_first() {
        let invalid = printing("not-a-date", "1");
        let valid = printing("1993-08-05", "1");
        assert_eq!(compare_printings(&invalid, &valid), Ordering::Less);
    }

    #[test]
    fn test_compare_exact_tie_is_equal() {
        let a = printing("2020-01-01", "107");
        let b = printing("2020-01-01", "107");
        assert_eq!(compare_printings(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_reducer_names_offending_record() {
        let mut bad = printing("2020-01-01", "9");
        bad.set.code = String::new();

        let err = build_index(vec![bad]).unwrap_err();
        match err {
            BuilderError::MalformedRecord { reason, .. } => {
                assert_eq!(reason, "empty set code");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
