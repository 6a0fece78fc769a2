//! The 88 IAU constellations.
//!
//! Each constellation carries its standard three-letter abbreviation, its
//! full name and an approximate centre, the midpoint of its RA and Dec
//! extents. The centre is used to order observing lists so that neighbouring
//! constellations are listed together.

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use crate::FieldError;

macro_rules! constellations {
    ($($variant:ident => ($abbreviation:literal, $name:literal, $ra:literal, $dec:literal)),+ $(,)?) => {
        /// One of the 88 IAU constellations.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Constellation {
            $($variant),+
        }

        impl Constellation {
            /// Every constellation, in alphabetical order of abbreviation.
            pub const ALL: &'static [Constellation] = &[$(Constellation::$variant),+];

            pub fn abbreviation(self) -> &'static str {
                match self {
                    $(Constellation::$variant => $abbreviation),+
                }
            }

            pub fn full_name(self) -> &'static str {
                match self {
                    $(Constellation::$variant => $name),+
                }
            }

            /// Right ascension of the centre, in hours.
            pub fn center_ra(self) -> f64 {
                match self {
                    $(Constellation::$variant => $ra),+
                }
            }

            /// Declination of the centre, in degrees.
            pub fn center_dec(self) -> f64 {
                match self {
                    $(Constellation::$variant => $dec),+
                }
            }
        }
    };
}

constellations! {
    Andromeda => ("And", "Andromeda", 0.81, 37.4),
    Antlia => ("Ant", "Antlia", 10.27, -32.5),
    Apus => ("Aps", "Apus", 16.14, -75.3),
    Aquila => ("Aql", "Aquila", 19.67, 3.4),
    Aquarius => ("Aqr", "Aquarius", 22.29, -10.8),
    Ara => ("Ara", "Ara", 17.37, -56.6),
    Aries => ("Ari", "Aries", 2.64, 20.8),
    Auriga => ("Aur", "Auriga", 6.07, 42.0),
    Bootes => ("Boo", "Bootes", 14.71, 31.2),
    Caelum => ("Cae", "Caelum", 4.70, -37.9),
    Camelopardalis => ("Cam", "Camelopardalis", 8.86, 69.4),
    Capricornus => ("Cap", "Capricornus", 21.05, -18.0),
    Carina => ("Car", "Carina", 8.70, -63.2),
    Cassiopeia => ("Cas", "Cassiopeia", 1.32, 62.2),
    Centaurus => ("Cen", "Centaurus", 13.07, -47.3),
    Cepheus => ("Cep", "Cepheus", 2.54, 71.0),
    Cetus => ("Cet", "Cetus", 1.67, -7.2),
    Chamaeleon => ("Cha", "Chamaeleon", 10.69, -79.2),
    Circinus => ("Cir", "Circinus", 14.58, -63.0),
    CanisMajor => ("CMa", "Canis Major", 6.83, -22.1),
    CanisMinor => ("CMi", "Canis Minor", 7.65, 6.4),
    Cancer => ("Cnc", "Cancer", 8.65, 19.8),
    Columba => ("Col", "Columba", 5.86, -35.1),
    ComaBerenices => ("Com", "Coma Berenices", 12.79, 23.3),
    CoronaAustralis => ("CrA", "Corona Australis", 18.65, -41.1),
    CoronaBorealis => ("CrB", "Corona Borealis", 15.84, 32.6),
    Crater => ("Crt", "Crater", 11.40, -15.9),
    Crux => ("Cru", "Crux", 12.45, -60.2),
    Corvus => ("Crv", "Corvus", 12.44, -18.4),
    CanesVenatici => ("CVn", "Canes Venatici", 13.12, 40.1),
    Cygnus => ("Cyg", "Cygnus", 20.59, 44.5),
    Delphinus => ("Del", "Delphinus", 20.69, 11.7),
    Dorado => ("Dor", "Dorado", 5.24, -59.4),
    Draco => ("Dra", "Draco", 15.14, 67.0),
    Equuleus => ("Equ", "Equuleus", 21.19, 7.8),
    Eridanus => ("Eri", "Eridanus", 3.30, -28.8),
    Fornax => ("For", "Fornax", 2.80, -31.6),
    Gemini => ("Gem", "Gemini", 7.07, 22.6),
    Grus => ("Gru", "Grus", 22.46, -46.4),
    Hercules => ("Her", "Hercules", 17.39, 27.5),
    Horologium => ("Hor", "Horologium", 3.28, -53.3),
    Hydra => ("Hya", "Hydra", 11.61, -14.5),
    Hydrus => ("Hyi", "Hydrus", 2.34, -70.0),
    Indus => ("Ind", "Indus", 21.97, -59.7),
    Lacerta => ("Lac", "Lacerta", 22.46, 46.0),
    Leo => ("Leo", "Leo", 10.67, 13.1),
    Lepus => ("Lep", "Lepus", 5.57, -19.0),
    Libra => ("Lib", "Libra", 15.20, -15.2),
    LeoMinor => ("LMi", "Leo Minor", 10.25, 32.1),
    Lupus => ("Lup", "Lupus", 15.22, -42.7),
    Lynx => ("Lyn", "Lynx", 7.99, 47.5),
    Lyra => ("Lyr", "Lyra", 18.85, 36.7),
    Mensa => ("Men", "Mensa", 5.42, -77.5),
    Microscopium => ("Mic", "Microscopium", 20.96, -36.3),
    Monoceros => ("Mon", "Monoceros", 7.06, 0.3),
    Musca => ("Mus", "Musca", 12.59, -70.2),
    Norma => ("Nor", "Norma", 15.90, -51.4),
    Octans => ("Oct", "Octans", 23.00, -82.2),
    Ophiuchus => ("Oph", "Ophiuchus", 17.39, -7.9),
    Orion => ("Ori", "Orion", 5.58, 5.9),
    Pavo => ("Pav", "Pavo", 19.61, -65.8),
    Pegasus => ("Peg", "Pegasus", 22.70, 19.5),
    Perseus => ("Per", "Perseus", 3.18, 45.0),
    Phoenix => ("Phe", "Phoenix", 0.93, -48.6),
    Pictor => ("Pic", "Pictor", 5.71, -53.5),
    PiscisAustrinus => ("PsA", "Piscis Austrinus", 22.28, -30.6),
    Pisces => ("Psc", "Pisces", 0.48, 13.7),
    Puppis => ("Pup", "Puppis", 7.26, -31.2),
    Pyxis => ("Pyx", "Pyxis", 8.95, -27.4),
    Reticulum => ("Ret", "Reticulum", 3.92, -60.0),
    Sculptor => ("Scl", "Sculptor", 0.44, -32.1),
    Scorpius => ("Sco", "Scorpius", 16.89, -27.0),
    Scutum => ("Sct", "Scutum", 18.67, -9.9),
    Serpens => ("Ser", "Serpens", 16.95, 6.1),
    Sextans => ("Sex", "Sextans", 10.27, -2.6),
    Sagitta => ("Sge", "Sagitta", 19.65, 18.9),
    Sagittarius => ("Sgr", "Sagittarius", 19.10, -28.5),
    Taurus => ("Tau", "Taurus", 4.70, 14.9),
    Telescopium => ("Tel", "Telescopium", 19.33, -51.0),
    TriangulumAustrale => ("TrA", "Triangulum Australe", 16.08, -65.4),
    Triangulum => ("Tri", "Triangulum", 2.18, 31.5),
    Tucana => ("Tuc", "Tucana", 23.78, -65.8),
    UrsaMajor => ("UMa", "Ursa Major", 11.31, 50.7),
    UrsaMinor => ("UMi", "Ursa Minor", 15.00, 77.7),
    Vela => ("Vel", "Vela", 9.58, -47.2),
    Virgo => ("Vir", "Virgo", 13.41, -4.2),
    Volans => ("Vol", "Volans", 7.80, -69.8),
    Vulpecula => ("Vul", "Vulpecula", 20.23, 24.4),
}

static LOOKUP: LazyLock<HashMap<String, Constellation>> = LazyLock::new(|| {
    let mut lookup = HashMap::new();
    for &constellation in Constellation::ALL {
        lookup.insert(constellation.abbreviation().to_lowercase(), constellation);
        lookup.insert(constellation.full_name().to_lowercase(), constellation);
    }
    lookup
});

impl Constellation {
    /// Looks up an abbreviation or full name, case-insensitively.
    pub fn lookup(name: &str) -> Option<Constellation> {
        LOOKUP.get(&name.trim().to_lowercase()).copied()
    }
}

impl FromStr for Constellation {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| FieldError::UnknownConstellation {
            field: s.to_string(),
        })
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
