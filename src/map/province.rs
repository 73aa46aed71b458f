//! Provinces, powers, and coasts of the standard Diplomacy map.
//!
//! The 75 provinces are enumerated alphabetically by 3-letter id and act as
//! indices into compile-time metadata and border tables. Category, supply
//! center status, and home power never change during a game; ownership and
//! occupancy live in [`crate::board::Position`].

use std::fmt;

/// The number of provinces on the standard map.
pub const PROVINCE_COUNT: usize = 75;

/// The number of supply centers on the standard map.
pub const SUPPLY_CENTER_COUNT: usize = 34;

/// A province on the standard map, usable as an array index via `as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Province {
    Adr = 0,  // Adriatic Sea
    Aeg = 1,  // Aegean Sea
    Alb = 2,  // Albania
    Ank = 3,  // Ankara
    Apu = 4,  // Apulia
    Arm = 5,  // Armenia
    Bal = 6,  // Baltic Sea
    Bar = 7,  // Barents Sea
    Bel = 8,  // Belgium
    Ber = 9,  // Berlin
    Bla = 10, // Black Sea
    Boh = 11, // Bohemia
    Bot = 12, // Gulf of Bothnia
    Bre = 13, // Brest
    Bud = 14, // Budapest
    Bul = 15, // Bulgaria
    Bur = 16, // Burgundy
    Cly = 17, // Clyde
    Con = 18, // Constantinople
    Den = 19, // Denmark
    Eas = 20, // Eastern Mediterranean
    Edi = 21, // Edinburgh
    Eng = 22, // English Channel
    Fin = 23, // Finland
    Gal = 24, // Galicia
    Gas = 25, // Gascony
    Gol = 26, // Gulf of Lyon
    Gre = 27, // Greece
    Hel = 28, // Heligoland Bight
    Hol = 29, // Holland
    Ion = 30, // Ionian Sea
    Iri = 31, // Irish Sea
    Kie = 32, // Kiel
    Lon = 33, // London
    Lvn = 34, // Livonia
    Lvp = 35, // Liverpool
    Mao = 36, // Mid-Atlantic Ocean
    Mar = 37, // Marseilles
    Mos = 38, // Moscow
    Mun = 39, // Munich
    Naf = 40, // North Africa
    Nao = 41, // North Atlantic Ocean
    Nap = 42, // Naples
    Nrg = 43, // Norwegian Sea
    Nth = 44, // North Sea
    Nwy = 45, // Norway
    Par = 46, // Paris
    Pic = 47, // Picardy
    Pie = 48, // Piedmont
    Por = 49, // Portugal
    Pru = 50, // Prussia
    Rom = 51, // Rome
    Ruh = 52, // Ruhr
    Rum = 53, // Rumania
    Ser = 54, // Serbia
    Sev = 55, // Sevastopol
    Sil = 56, // Silesia
    Ska = 57, // Skagerrak
    Smy = 58, // Smyrna
    Spa = 59, // Spain
    Stp = 60, // St. Petersburg
    Swe = 61, // Sweden
    Syr = 62, // Syria
    Tri = 63, // Trieste
    Tun = 64, // Tunisia
    Tus = 65, // Tuscany
    Tyr = 66, // Tyrolia
    Tys = 67, // Tyrrhenian Sea
    Ukr = 68, // Ukraine
    Ven = 69, // Venice
    Vie = 70, // Vienna
    Wal = 71, // Wales
    War = 72, // Warsaw
    Wes = 73, // Western Mediterranean
    Yor = 74, // Yorkshire
}

/// All provinces in index order.
pub const ALL_PROVINCES: [Province; PROVINCE_COUNT] = [
    Province::Adr, Province::Aeg, Province::Alb, Province::Ank,
    Province::Apu, Province::Arm, Province::Bal, Province::Bar,
    Province::Bel, Province::Ber, Province::Bla, Province::Boh,
    Province::Bot, Province::Bre, Province::Bud, Province::Bul,
    Province::Bur, Province::Cly, Province::Con, Province::Den,
    Province::Eas, Province::Edi, Province::Eng, Province::Fin,
    Province::Gal, Province::Gas, Province::Gol, Province::Gre,
    Province::Hel, Province::Hol, Province::Ion, Province::Iri,
    Province::Kie, Province::Lon, Province::Lvn, Province::Lvp,
    Province::Mao, Province::Mar, Province::Mos, Province::Mun,
    Province::Naf, Province::Nao, Province::Nap, Province::Nrg,
    Province::Nth, Province::Nwy, Province::Par, Province::Pic,
    Province::Pie, Province::Por, Province::Pru, Province::Rom,
    Province::Ruh, Province::Rum, Province::Ser, Province::Sev,
    Province::Sil, Province::Ska, Province::Smy, Province::Spa,
    Province::Stp, Province::Swe, Province::Syr, Province::Tri,
    Province::Tun, Province::Tus, Province::Tyr, Province::Tys,
    Province::Ukr, Province::Ven, Province::Vie, Province::Wal,
    Province::War, Province::Wes, Province::Yor,
];

/// Terrain classification. Armies enter inland and coastal provinces;
/// fleets enter sea and coastal provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Inland,
    Coastal,
    Sea,
}

/// Coast qualifier. `Coast::None` doubles as the "any coast" placeholder a
/// split-coast province carries before a specific coast is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coast {
    None,
    North,
    South,
    East,
}

impl Coast {
    /// Two-letter qualifier, empty for `None`.
    pub const fn abbr(self) -> &'static str {
        match self {
            Coast::None => "",
            Coast::North => "nc",
            Coast::South => "sc",
            Coast::East => "ec",
        }
    }

    pub fn from_abbr(s: &str) -> Option<Coast> {
        match s {
            "" => Some(Coast::None),
            "nc" => Some(Coast::North),
            "sc" => Some(Coast::South),
            "ec" => Some(Coast::East),
            _ => Option::None,
        }
    }
}

impl fmt::Display for Coast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

/// One of the seven great powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Power {
    Austria,
    England,
    France,
    Germany,
    Italy,
    Russia,
    Turkey,
}

/// All seven powers in standard order.
pub const ALL_POWERS: [Power; 7] = [
    Power::Austria,
    Power::England,
    Power::France,
    Power::Germany,
    Power::Italy,
    Power::Russia,
    Power::Turkey,
];

impl Power {
    pub const fn name(self) -> &'static str {
        match self {
            Power::Austria => "austria",
            Power::England => "england",
            Power::France => "france",
            Power::Germany => "germany",
            Power::Italy => "italy",
            Power::Russia => "russia",
            Power::Turkey => "turkey",
        }
    }

    pub fn from_name(name: &str) -> Option<Power> {
        ALL_POWERS.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static facts about a province.
pub struct ProvinceMeta {
    pub abbr: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub supply_center: bool,
    pub home: Option<Power>,
    pub coasts: &'static [Coast],
}

const fn prov(abbr: &'static str, name: &'static str, category: Category) -> ProvinceMeta {
    ProvinceMeta { abbr, name, category, supply_center: false, home: None, coasts: &[] }
}

const fn center(abbr: &'static str, name: &'static str, category: Category) -> ProvinceMeta {
    ProvinceMeta { abbr, name, category, supply_center: true, home: None, coasts: &[] }
}

const fn home(abbr: &'static str, name: &'static str, category: Category, power: Power) -> ProvinceMeta {
    ProvinceMeta { abbr, name, category, supply_center: true, home: Some(power), coasts: &[] }
}

/// A split-coast supply center. All three on the standard map are coastal SCs.
const fn split(
    abbr: &'static str,
    name: &'static str,
    home: Option<Power>,
    coasts: &'static [Coast],
) -> ProvinceMeta {
    ProvinceMeta { abbr, name, category: Category::Coastal, supply_center: true, home, coasts }
}

const EC: Coast = Coast::East;
const NC: Coast = Coast::North;
const SC: Coast = Coast::South;

use Category::{Coastal, Inland, Sea};
use Power::{Austria, England, France, Germany, Italy, Russia, Turkey};

/// Metadata table, indexed by `Province as usize`.
pub static METADATA: [ProvinceMeta; PROVINCE_COUNT] = [
    prov("adr", "Adriatic Sea", Sea),
    prov("aeg", "Aegean Sea", Sea),
    prov("alb", "Albania", Coastal),
    home("ank", "Ankara", Coastal, Turkey),
    prov("apu", "Apulia", Coastal),
    prov("arm", "Armenia", Coastal),
    prov("bal", "Baltic Sea", Sea),
    prov("bar", "Barents Sea", Sea),
    center("bel", "Belgium", Coastal),
    home("ber", "Berlin", Coastal, Germany),
    prov("bla", "Black Sea", Sea),
    prov("boh", "Bohemia", Inland),
    prov("bot", "Gulf of Bothnia", Sea),
    home("bre", "Brest", Coastal, France),
    home("bud", "Budapest", Inland, Austria),
    split("bul", "Bulgaria", None, &[EC, SC]),
    prov("bur", "Burgundy", Inland),
    prov("cly", "Clyde", Coastal),
    home("con", "Constantinople", Coastal, Turkey),
    center("den", "Denmark", Coastal),
    prov("eas", "Eastern Mediterranean", Sea),
    home("edi", "Edinburgh", Coastal, England),
    prov("eng", "English Channel", Sea),
    prov("fin", "Finland", Coastal),
    prov("gal", "Galicia", Inland),
    prov("gas", "Gascony", Coastal),
    prov("gol", "Gulf of Lyon", Sea),
    center("gre", "Greece", Coastal),
    prov("hel", "Heligoland Bight", Sea),
    center("hol", "Holland", Coastal),
    prov("ion", "Ionian Sea", Sea),
    prov("iri", "Irish Sea", Sea),
    home("kie", "Kiel", Coastal, Germany),
    home("lon", "London", Coastal, England),
    prov("lvn", "Livonia", Coastal),
    home("lvp", "Liverpool", Coastal, England),
    prov("mao", "Mid-Atlantic Ocean", Sea),
    home("mar", "Marseilles", Coastal, France),
    home("mos", "Moscow", Inland, Russia),
    home("mun", "Munich", Inland, Germany),
    prov("naf", "North Africa", Coastal),
    prov("nao", "North Atlantic Ocean", Sea),
    home("nap", "Naples", Coastal, Italy),
    prov("nrg", "Norwegian Sea", Sea),
    prov("nth", "North Sea", Sea),
    center("nwy", "Norway", Coastal),
    home("par", "Paris", Inland, France),
    prov("pic", "Picardy", Coastal),
    prov("pie", "Piedmont", Coastal),
    center("por", "Portugal", Coastal),
    prov("pru", "Prussia", Coastal),
    home("rom", "Rome", Coastal, Italy),
    prov("ruh", "Ruhr", Inland),
    center("rum", "Rumania", Coastal),
    center("ser", "Serbia", Inland),
    home("sev", "Sevastopol", Coastal, Russia),
    prov("sil", "Silesia", Inland),
    prov("ska", "Skagerrak", Sea),
    home("smy", "Smyrna", Coastal, Turkey),
    split("spa", "Spain", None, &[NC, SC]),
    split("stp", "St. Petersburg", Some(Russia), &[NC, SC]),
    center("swe", "Sweden", Coastal),
    prov("syr", "Syria", Coastal),
    home("tri", "Trieste", Coastal, Austria),
    center("tun", "Tunisia", Coastal),
    prov("tus", "Tuscany", Coastal),
    prov("tyr", "Tyrolia", Inland),
    prov("tys", "Tyrrhenian Sea", Sea),
    prov("ukr", "Ukraine", Inland),
    home("ven", "Venice", Coastal, Italy),
    home("vie", "Vienna", Inland, Austria),
    prov("wal", "Wales", Coastal),
    home("war", "Warsaw", Inland, Russia),
    prov("wes", "Western Mediterranean", Sea),
    prov("yor", "Yorkshire", Coastal),
];

impl Province {
    pub const fn abbr(self) -> &'static str {
        METADATA[self as usize].abbr
    }

    pub const fn name(self) -> &'static str {
        METADATA[self as usize].name
    }

    pub const fn category(self) -> Category {
        METADATA[self as usize].category
    }

    pub const fn is_supply_center(self) -> bool {
        METADATA[self as usize].supply_center
    }

    /// The power this province is a home center for, if any.
    pub const fn home_power(self) -> Option<Power> {
        METADATA[self as usize].home
    }

    /// Named coasts of a split-coast province, empty otherwise.
    pub const fn coasts(self) -> &'static [Coast] {
        METADATA[self as usize].coasts
    }

    pub const fn has_coasts(self) -> bool {
        !METADATA[self as usize].coasts.is_empty()
    }

    pub fn from_abbr(abbr: &str) -> Option<Province> {
        ALL_PROVINCES.into_iter().find(|p| p.abbr() == abbr)
    }

    /// Converts an index back to a province, `None` if out of range.
    pub fn from_index(idx: usize) -> Option<Province> {
        ALL_PROVINCES.get(idx).copied()
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}
