/// The two demo identities. Lateral navigation in the avatar region and
/// the avatar select action both toggle this; it is the single source of
/// truth for which username label and game set are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProfileId {
    #[default]
    Primary,
    Secondary,
}

impl ProfileId {
    pub fn toggled(self) -> Self {
        match self {
            ProfileId::Primary => ProfileId::Secondary,
            ProfileId::Secondary => ProfileId::Primary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTile {
    pub name: String,
    pub download: bool,
}

impl GameTile {
    fn new(name: &str) -> Option<Self> {
        Some(Self {
            name: name.to_string(),
            download: false,
        })
    }

    fn download(name: &str) -> Option<Self> {
        Some(Self {
            name: name.to_string(),
            download: true,
        })
    }
}

/// A profile's tile row. `None` slots are empty placeholders that tile
/// navigation skips over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub display_name: String,
    pub tiles: Vec<Option<GameTile>>,
}

impl Profile {
    pub fn first_interactive_index(&self) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.is_some())
    }

    /// Steps `from` by `step` with wrap-around, skipping empty slots. When
    /// no other slot is interactive the index stays put.
    pub fn next_interactive(&self, from: usize, step: isize) -> usize {
        let len = self.tiles.len() as isize;
        if len == 0 || self.tiles.iter().all(|tile| tile.is_none()) {
            return from;
        }

        let mut index = from as isize;
        loop {
            index = (index + step).rem_euclid(len);
            if self.tiles[index as usize].is_some() {
                return index as usize;
            }
            if index == from as isize {
                return from;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCatalog {
    primary: Profile,
    secondary: Profile,
}

impl ProfileCatalog {
    /// Built-in demo catalog: a full primary row and a sparse secondary
    /// row whose trailing slots are empty.
    pub fn demo() -> Self {
        Self {
            primary: Profile {
                display_name: "Archer".to_string(),
                tiles: vec![
                    GameTile::new("frontier"),
                    GameTile::new("circuit-dash"),
                    GameTile::new("starfall"),
                    GameTile::new("relic-hunt"),
                    GameTile::new("library-overflow"),
                    GameTile::download("system-update"),
                ],
            },
            secondary: Profile {
                display_name: "Ghost".to_string(),
                tiles: vec![
                    GameTile::new("night-run"),
                    GameTile::new("echo-chamber"),
                    GameTile::new("drift"),
                    None,
                    None,
                    None,
                ],
            },
        }
    }

    pub fn profile(&self, id: ProfileId) -> &Profile {
        match id {
            ProfileId::Primary => &self.primary,
            ProfileId::Secondary => &self.secondary,
        }
    }
}
