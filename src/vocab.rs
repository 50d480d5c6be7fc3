//! Allow-lists for the enumerated search fields.

/// Keywords (`schlagwort`).
pub const TAGS: &[&str] = &[
    "Abenteuer",
    "Aggressivität",
    "AIDS",
    "Alter",
    "Angst",
    "Arbeitslosigkeit",
    "Arbeitswelt",
    "Aufklärung",
    "Außenseiter",
    "Behinderung",
    "Bildende Kunst",
    "Biografie",
    "Computer",
    "Emanzipation",
    "Ethik",
    "Fabeln",
    "Familie",
    "Fantastik",
    "Fernsehen",
    "Flucht",
    "Fremde Kulturen",
    "Freundschaft",
    "Frieden",
    "Geschichte",
    "Homosexualität",
    "Indianer",
    "Interkulturelle Kommunikation",
    "Junge",
    "Krankheit",
    "Krieg",
    "Kriminalität",
    "LesePeter",
    "Liebe/Erste Liebe",
    "Literatur",
    "Mädchen",
    "Märchen",
    "Medien",
    "Missbrauch",
    "Musik",
    "Nationalsozialismus",
    "Natur",
    "Naturschutz/Umweltschutz",
    "Philosophie",
    "Politik",
    "Rassismus",
    "Rechtsextremismus",
    "Religion",
    "Sagen",
    "Schüler",
    "Schwangerschaft",
    "Seefahrt",
    "Seeräuber",
    "Sekte",
    "Sexualität",
    "Spannung",
    "Sport",
    "Spuk",
    "Sterben",
    "Sucht",
    "Technik",
    "Terrorismus",
    "Tiere",
    "Tod",
    "Trennung",
    "Ungleichheit",
    "Virtuelle Realität",
    "Weihnachten",
    "Zukunft",
];

pub const RATINGS: &[&str] = &[
    "empfehlenswert",
    "sehr empfehlenswert",
    "nicht empfehlenswert",
];

/// Fields of application (`einsatz`).
pub const APPLICATIONS: &[&str] = &[
    "Klassenlesestoff",
    "Büchereigrundstock für Arbeitsbücherei",
];

/// Media types (`medienart`).
pub const MEDIA_TYPES: &[&str] = &[
    "Abreißkalender",
    "Arbeitsheft",
    "Audio-CD",
    "Audio-CD",
    "Audio-CD / Hörbuch / Musik",
    "Audio-Kassette",
    "Bilderbuch",
    "Block",
    "broschiert",
    "Broschur",
    "Buch",
    "Buch (Print, gebunden)",
    "Buch, gebunden",
    "Buch: Aufklappbuch",
    "Buch: Badewannenbuch",
    "Buch: Broschur",
    "Buch: Fühl- oder Spiel(Bilder)buch",
    "Buch: Hardcover",
    "Buch: Hartpappe",
    "Buch: Heftbindung",
    "Buch: Pop-up-Buch",
    "Buch: Softcover",
    "Buch: Spielbuch",
    "Buch: Taschenbuch",
    "Buch: Zieh- oder Drehbuch",
    "CD",
    "CD-ROM",
    "CD/DVD-ROM / Software",
    "DVD",
    "Halbleinen",
    "Hardcover",
    "Hartpappe",
    "Heft",
    "Hörbuch",
    "Kalender",
    "Karten",
    "Kartenspiel",
    "Klappbroschur",
    "Klappenbroschur",
    "Lernheft",
    "Paperback",
    "Pappbilderbuch",
    "Softcover",
    "Spiel",
    "Spiel / Arbeitsheft",
    "Spielbuch",
    "Spielkarten",
    "Spiralblock",
    "Tagesabreißkalender",
    "Taschenbuch",
    "Taschenbuch / Heft / Broschur",
];

/// Recommended age ranges (`alter`).
pub const AGES: &[&str] = &[
    "0-3",
    "4-5",
    "6-7",
    "8-9",
    "10-11",
    "12-13",
    "14-15",
    "16-17",
    "ab 18",
];

pub const GENRES: &[&str] = &[
    "Abenteuererzählung",
    "Adoleszenzroman",
    "Adventskalender",
    "Anthologie",
    "Atlas",
    "Autobiografie/Autobiografische Erzählung",
    "Bastelbuch",
    "Bastelheft",
    "Bilderbuch",
    "Bilderbucherzählung",
    "Bilderbuchkino",
    "Bildergeschichte",
    "Biografie",
    "Biografie/Biografische Erzählung",
    "Briefroman",
    "Cartoon",
    "Comic",
    "Comic / Graphic Novel",
    "Detektivgeschichte",
    "Erstlesebuch",
    "Erstlesetext",
    "erzählendes Sachbuch",
    "Erzählung",
    "Erzählung / Roman",
    "Erzählungen",
    "Fabel",
    "Fachbuch",
    "Fachliteratur",
    "Fantastik",
    "Fantastische Erzählung",
    "Fantasy",
    "Gedichte",
    "Geschichte",
    "Geschichten",
    "Geschichtensammlung",
    "Graphic Novel",
    "Gruselgeschichte",
    "Gutenachtgeschichten",
    "Historische Erzählung",
    "Historischer Roman",
    "Hörbuch",
    "Hörspiel",
    "Jugendbuch",
    "Jugendroman",
    "Jugendthriller",
    "Kalender",
    "Kinderbuch",
    "Kindergeschichten",
    "Kinderlieder",
    "Kinderroman",
    "Kochbuch",
    "Kriminalerzählung",
    "Kunstbuch",
    "Kurzgeschichten",
    "Lernbuch",
    "Lernspiel",
    "Lernspiel(e)",
    "Lesebuch",
    "Lexikon",
    "Liebesroman",
    "Lieder",
    "Liederbuch",
    "Liedersammlung",
    "Lyrik",
    "Lyrik / Lieder",
    "Malbuch",
    "Musical",
    "Musik",
    "Mädchenbuch",
    "Mädchenroman",
    "Märchen",
    "Märchen / Fabeln / Sagen",
    "Quiz",
    "Ratgeber",
    "Reisebericht",
    "Reiseführer",
    "Roman",
    "Rätsel",
    "Rätsel(spiele)",
    "Sach-Bilderbuch",
    "Sachbilderbuch",
    "Sachbuch",
    "Sachliteratur",
    "Sachliteratur / Sachbilderbuch",
    "Sachliteratur/Sachbilderbuch",
    "Sagen",
    "Schülerhilfe",
    "Science Fiction",
    "Sonstige",
    "Spiel",
    "Spiel- und Bastelbuch",
    "Spielbuch",
    "Tagebuchroman",
    "Texte von Jugendlichen",
    "Texte von Kindern",
    "Theater",
    "Thriller",
    "Tierbuch",
    "Tiergeschichte",
    "Tiergeschichten",
    "Vorlesebuch",
    "Vorlesegeschichten",
    "Wahrnehmungsspiel(e)",
    "Weihnachtsgeschichte",
    "Weihnachtsgeschichten",
    "Wimmelbuch",
    "Witze",
    "Wörterbuch",
    "Zieh-, Dreh, Aufklapp-, Fühl- oder Spiel(bilder)buch",
];
