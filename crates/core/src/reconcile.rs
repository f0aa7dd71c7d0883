//! Merging of structured metadata and supplementary markup.
//!
//! Person images are joined to names purely by position within a role.
//! Nothing checks that the Nth image card belongs to the Nth credited
//! name; when the page orders the two lists differently the images are
//! attached to the wrong people. This is a known limitation.

use crate::extract::{MetadataRecord, Role, SupplementalRecord};
use crate::records::{MovieRecord, PersonRecord, PersonRef, SeasonRecord, ShowRecord};

/// Cast entries kept on a movie record.
pub const MOVIE_CAST_LIMIT: usize = 5;

/// Cast entries kept on a show record.
pub const SHOW_CAST_LIMIT: usize = 10;

/// Pair the first `limit` names with the image slot at the same index.
///
/// Names beyond the end of `images` get `image: None`.
pub fn align_people(
    names: &[String],
    images: &[Option<String>],
    limit: Option<usize>,
) -> Vec<PersonRef> {
    let limit = limit.unwrap_or(names.len());
    names
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, name)| PersonRef {
            name: name.clone(),
            image: images.get(i).cloned().flatten(),
        })
        .collect()
}

fn role_refs(
    metadata: &MetadataRecord,
    supplemental: &SupplementalRecord,
    role: Role,
    limit: Option<usize>,
) -> Vec<PersonRef> {
    align_people(metadata.people(role), supplemental.images(role), limit)
}

pub fn reconcile_movie(metadata: MetadataRecord, supplemental: &SupplementalRecord) -> MovieRecord {
    MovieRecord {
        directors: role_refs(&metadata, supplemental, Role::Director, None),
        cast: role_refs(&metadata, supplemental, Role::Actor, Some(MOVIE_CAST_LIMIT)),
        year: metadata.year(),
        title: metadata.name,
        plot_outline: metadata.plot,
        cover_url: metadata.image_url,
        rating: metadata.aggregate_rating,
        genres: metadata.genres,
    }
}

pub fn reconcile_show(metadata: MetadataRecord, supplemental: &SupplementalRecord) -> ShowRecord {
    ShowRecord {
        creators: role_refs(&metadata, supplemental, Role::Creator, None),
        cast: role_refs(&metadata, supplemental, Role::Actor, Some(SHOW_CAST_LIMIT)),
        year: metadata.year(),
        title: metadata.name,
        plot_outline: metadata.plot,
        cover_url: metadata.image_url,
        rating: metadata.aggregate_rating,
        genres: metadata.genres,
        number_of_seasons: supplemental.season_count,
    }
}

/// Season records come from markup alone; episodes are ordered by
/// episode number, keeping document order among equal numbers.
pub fn reconcile_season(season_number: u32, supplemental: SupplementalRecord) -> SeasonRecord {
    let mut episodes = supplemental.episodes;
    episodes.sort_by_key(|episode| episode.episode_number);

    SeasonRecord {
        season_number,
        episodes,
    }
}

/// Markup biography and headshot win over their structured counterparts.
pub fn reconcile_person(
    metadata: MetadataRecord,
    supplemental: SupplementalRecord,
) -> PersonRecord {
    PersonRecord {
        name: metadata.name,
        bio: supplemental.biography.unwrap_or(metadata.description),
        headshot: supplemental.headshot.unwrap_or(metadata.image_url),
        birth_date: metadata.birth_date,
        birth_place: metadata.birth_place,
        profession: metadata.job_title,
    }
}
