//! Fixed fallback catalog served when the live API is unavailable.
//!
//! The data has the same shape as a live response, so callers cannot
//! tell the two paths apart.

use super::envelope::total_pages_for;
use super::types::{Comment, Genre, Movie, MovieDetails, MovieId, ResultPage};

/// One catalog row.
struct Entry {
    id: i64,
    title: &'static str,
    year: i32,
    poster: &'static str,
    rating: f64,
    genres: &'static [&'static str],
    director: &'static str,
    cast: &'static [&'static str],
    synopsis: &'static str,
    duration: u32,
}

impl Entry {
    fn to_movie(&self) -> Movie {
        Movie {
            id: MovieId::Number(self.id),
            title: String::from(self.title),
            year: Some(self.year),
            poster_url: Some(format!(
                "https://via.placeholder.com/300x450/1a1a1a/ffffff?text={}",
                self.poster
            )),
            rating: Some(self.rating),
            genres: self.genres.iter().map(|g| String::from(*g)).collect(),
            director: String::from(self.director),
            cast: self.cast.iter().map(|c| String::from(*c)).collect(),
            synopsis: String::from(self.synopsis),
            duration_minutes: self.duration,
        }
    }
}

/// Number of movies in the fallback catalog.
pub const MOCK_CATALOG_SIZE: usize = CATALOG.len();

const CATALOG: [Entry; 15] = [
    Entry {
        id: 1,
        title: "Inception",
        year: 2010,
        poster: "Inception",
        rating: 8.8,
        genres: &["Action", "Sci-Fi", "Thriller"],
        director: "Christopher Nolan",
        cast: &[
            "Leonardo DiCaprio",
            "Marion Cotillard",
            "Tom Hardy",
            "Ellen Page",
        ],
        synopsis: "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.",
        duration: 148,
    },
    Entry {
        id: 2,
        title: "Interstellar",
        year: 2014,
        poster: "Interstellar",
        rating: 8.6,
        genres: &["Adventure", "Drama", "Sci-Fi"],
        director: "Christopher Nolan",
        cast: &["Matthew McConaughey", "Anne Hathaway", "Jessica Chastain"],
        synopsis: "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
        duration: 169,
    },
    Entry {
        id: 3,
        title: "The Matrix",
        year: 1999,
        poster: "The+Matrix",
        rating: 8.7,
        genres: &["Action", "Sci-Fi"],
        director: "The Wachowskis",
        cast: &["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"],
        synopsis: "A computer programmer is led to fight an underground war against powerful computers who have constructed his entire reality with a system called the Matrix.",
        duration: 136,
    },
    Entry {
        id: 4,
        title: "Pulp Fiction",
        year: 1994,
        poster: "Pulp+Fiction",
        rating: 8.9,
        genres: &["Crime", "Drama"],
        director: "Quentin Tarantino",
        cast: &["John Travolta", "Uma Thurman", "Samuel L. Jackson"],
        synopsis: "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine in four tales of violence and redemption.",
        duration: 154,
    },
    Entry {
        id: 5,
        title: "The Dark Knight",
        year: 2008,
        poster: "The+Dark+Knight",
        rating: 9.0,
        genres: &["Action", "Crime", "Drama"],
        director: "Christopher Nolan",
        cast: &["Christian Bale", "Heath Ledger", "Aaron Eckhart"],
        synopsis: "When the menace known as the Joker wreaks havoc on Gotham City, Batman must accept one of the greatest psychological and physical tests.",
        duration: 152,
    },
    Entry {
        id: 6,
        title: "Fight Club",
        year: 1999,
        poster: "Fight+Club",
        rating: 8.8,
        genres: &["Drama"],
        director: "David Fincher",
        cast: &["Brad Pitt", "Edward Norton", "Helena Bonham Carter"],
        synopsis: "An insomniac office worker and a devil-may-care soap maker form an underground fight club.",
        duration: 139,
    },
    Entry {
        id: 7,
        title: "Forrest Gump",
        year: 1994,
        poster: "Forrest+Gump",
        rating: 8.8,
        genres: &["Drama", "Romance"],
        director: "Robert Zemeckis",
        cast: &["Tom Hanks", "Robin Wright", "Gary Sinise"],
        synopsis: "The presidencies of Kennedy and Johnson, the Vietnam War, and other historical events unfold from the perspective of an Alabama man.",
        duration: 142,
    },
    Entry {
        id: 8,
        title: "Goodfellas",
        year: 1990,
        poster: "Goodfellas",
        rating: 8.7,
        genres: &["Biography", "Crime", "Drama"],
        director: "Martin Scorsese",
        cast: &["Robert De Niro", "Ray Liotta", "Joe Pesci"],
        synopsis: "The story of Henry Hill and his life in the mob, covering his relationship with his wife Karen Hill.",
        duration: 146,
    },
    Entry {
        id: 9,
        title: "The Shawshank Redemption",
        year: 1994,
        poster: "Shawshank+Redemption",
        rating: 9.3,
        genres: &["Drama"],
        director: "Frank Darabont",
        cast: &["Tim Robbins", "Morgan Freeman", "Bob Gunton"],
        synopsis: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        duration: 142,
    },
    Entry {
        id: 10,
        title: "The Godfather",
        year: 1972,
        poster: "The+Godfather",
        rating: 9.2,
        genres: &["Crime", "Drama"],
        director: "Francis Ford Coppola",
        cast: &["Marlon Brando", "Al Pacino", "James Caan"],
        synopsis: "An aging patriarch of an organized crime dynasty transfers control of his clandestine empire to his reluctant son.",
        duration: 175,
    },
    Entry {
        id: 11,
        title: "12 Angry Men",
        year: 1957,
        poster: "12+Angry+Men",
        rating: 9.0,
        genres: &["Crime", "Drama"],
        director: "Sidney Lumet",
        cast: &["Henry Fonda", "Lee J. Cobb", "Martin Balsam"],
        synopsis: "A jury holdout attempts to prevent a miscarriage of justice by forcing his colleagues to reconsider the evidence.",
        duration: 96,
    },
    Entry {
        id: 12,
        title: "Schindler's List",
        year: 1993,
        poster: "Schindlers+List",
        rating: 9.0,
        genres: &["Biography", "Drama", "History"],
        director: "Steven Spielberg",
        cast: &["Liam Neeson", "Ralph Fiennes", "Ben Kingsley"],
        synopsis: "In German-occupied Poland during World War II, industrialist Oskar Schindler saves his Jewish employees.",
        duration: 195,
    },
    Entry {
        id: 13,
        title: "The Lord of the Rings: The Return of the King",
        year: 2003,
        poster: "LOTR+Return+King",
        rating: 9.0,
        genres: &["Action", "Adventure", "Drama"],
        director: "Peter Jackson",
        cast: &["Elijah Wood", "Viggo Mortensen", "Ian McKellen"],
        synopsis: "Gandalf and Aragorn lead the World of Men against Sauron's army to draw his gaze from Frodo and Sam.",
        duration: 201,
    },
    Entry {
        id: 14,
        title: "The Lord of the Rings: The Fellowship of the Ring",
        year: 2001,
        poster: "LOTR+Fellowship",
        rating: 8.8,
        genres: &["Action", "Adventure", "Drama"],
        director: "Peter Jackson",
        cast: &["Elijah Wood", "Ian McKellen", "Orlando Bloom"],
        synopsis: "A meek Hobbit and eight companions set out on a journey to destroy the One Ring.",
        duration: 178,
    },
    Entry {
        id: 15,
        title: "Star Wars: Episode V - The Empire Strikes Back",
        year: 1980,
        poster: "Empire+Strikes+Back",
        rating: 8.7,
        genres: &["Action", "Adventure", "Fantasy"],
        director: "Irvin Kershner",
        cast: &["Mark Hamill", "Harrison Ford", "Carrie Fisher"],
        synopsis: "After the Rebels are brutally overpowered by the Empire, Luke Skywalker trains with Jedi Master Yoda.",
        duration: 124,
    },
];

const GENRES: [(u32, &str); 7] = [
    (1, "Action"),
    (2, "Adventure"),
    (3, "Comedy"),
    (4, "Drama"),
    (5, "Horror"),
    (6, "Sci-Fi"),
    (7, "Thriller"),
];

/// Returns one page of the fallback catalog.
///
/// Slices `[(page - 1) * limit, page * limit)`; a page past the end is empty.
/// Filters other than `page`/`limit` are not applied.
#[must_use]
pub fn mock_page(page: u32, limit: u32) -> ResultPage {
    let page = page.max(1);
    let limit = if limit == 0 {
        crate::types::DEFAULT_LIMIT
    } else {
        limit
    };
    let start = usize::try_from(page.saturating_sub(1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    let total = u32::try_from(MOCK_CATALOG_SIZE).unwrap_or(u32::MAX);

    ResultPage {
        items: CATALOG
            .iter()
            .skip(start)
            .take(take)
            .map(Entry::to_movie)
            .collect(),
        total,
        page,
        total_pages: total_pages_for(total, limit),
    }
}

/// Returns the fixed fallback detail record, carrying the requested ID.
#[must_use]
pub fn mock_movie_details(id: &MovieId) -> MovieDetails {
    let mut movie = CATALOG[0].to_movie();
    movie.id = id.clone();
    movie.synopsis = String::from(
        "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O., but his tragic past may doom the project and his team to disaster.",
    );

    let mut similar = CATALOG[1].to_movie();
    similar.poster_url = Some(String::from(
        "https://via.placeholder.com/192x288/1a1a1a/ffffff?text=Interstellar",
    ));
    similar.cast.truncate(2);
    similar.synopsis = String::new();

    MovieDetails {
        movie,
        release_date: Some(String::from("July 16, 2010")),
        comments: vec![
            Comment {
                id: MovieId::Number(1),
                user_name: String::from("Alex Chen"),
                user_avatar_url: String::from(
                    "https://via.placeholder.com/40x40/D97706/ffffff?text=AC",
                ),
                content: String::from(
                    "This movie completely blew my mind! The concept of dreams within dreams is executed perfectly. Nolan's direction is masterful.",
                ),
                created_at: String::from("2 hours ago"),
            },
            Comment {
                id: MovieId::Number(2),
                user_name: String::from("Sarah Johnson"),
                user_avatar_url: String::from(
                    "https://via.placeholder.com/40x40/F59E0B/ffffff?text=SJ",
                ),
                content: String::from(
                    "The visual effects are stunning and the soundtrack by Hans Zimmer is absolutely incredible. A true cinematic masterpiece!",
                ),
                created_at: String::from("5 hours ago"),
            },
        ],
        similar_movies: vec![similar],
        votes_up: 1247,
        votes_down: 89,
    }
}

/// Returns the fixed fallback genre list.
#[must_use]
pub fn mock_genres() -> Vec<Genre> {
    GENRES
        .iter()
        .map(|(id, name)| Genre {
            id: *id,
            name: String::from(*name),
        })
        .collect()
}
