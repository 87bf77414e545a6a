// Informal Indonesian chat vocabulary mapped to standard words.
//
// Replacement values are cleaned and resolved once when the table is first
// used, so a substituted word never needs another pass: no punctuation, no
// unsplit enclitics, no word that is itself a slang key.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Resolution stops after this many nested lookups.
const MAX_RESOLVE_DEPTH: usize = 4;

const RAW_SLANG: &[(&str, &str)] = &[
    ("abis", "habis"),
    ("ad", "ada"),
    ("adlh", "adalah"),
    ("afaik", "as far as i know"),
    ("ahaha", "haha"),
    ("aj", "saja"),
    ("ak", "saya"),
    ("akika", "aku"),
    ("akkoh", "aku"),
    ("akuwh", "aku"),
    ("alay", "norak"),
    ("alow", "halo"),
    ("ambilin", "ambilkan"),
    ("ancur", "hancur"),
    ("anjrit", "anjing"),
    ("anter", "antar"),
    ("apasih", "apa sih"),
    ("apes", "sial"),
    ("aps", "apa"),
    ("aq", "saya"),
    ("aquwh", "aku"),
    ("asbun", "asal bunyi"),
    ("aseekk", "asyik"),
    ("asekk", "asyik"),
    ("asem", "asam"),
    ("aspal", "asli tetapi palsu"),
    ("astul", "asal tulis"),
    ("ato", "atau"),
    ("awak", "saya"),
    ("ay", "sayang"),
    ("ayank", "sayang"),
    ("bakalan", "akan"),
    ("bandes", "bantuan desa"),
    ("bangedh", "banget"),
    ("banpol", "bantuan polisi"),
    ("banpur", "bantuan tempur"),
    ("basbang", "basi"),
    ("bcanda", "bercanda"),
    ("bdg", "bandung"),
    ("begajulan", "nakal"),
    ("beliin", "belikan"),
    ("bencong", "banci"),
    ("bentar", "sebentar"),
    ("beresin", "membereskan"),
    ("bete", "bosan"),
    ("beud", "banget"),
    ("bg", "abang"),
    ("bgmn", "bagaimana"),
    ("bgt", "banget"),
    ("bgtt", "banget"),
    ("bgttt", "banget"),
    ("bijimane", "bagaimana"),
    ("bintal", "bimbingan mental"),
    ("bkl", "akan"),
    ("bknnya", "bukannya"),
    ("blegug", "bodoh"),
    ("blh", "boleh"),
    ("bln", "bulan"),
    ("blum", "belum"),
    ("bnci", "benci"),
    ("bnran", "yang benar"),
    ("bodor", "lucu"),
    ("bokap", "ayah"),
    ("boker", "buang air besar"),
    ("bokis", "bohong"),
    ("boljug", "boleh juga"),
    ("bonek", "bocah nekat"),
    ("boyeh", "boleh"),
    ("br", "baru"),
    ("brg", "bareng"),
    ("bro", "saudara laki-laki"),
    ("bru", "baru"),
    ("bs", "bisa"),
    ("bsen", "bosan"),
    ("bt", "buat"),
    ("btw", "ngomong-ngomong"),
    ("buaya", "tidak setia"),
    ("bubbu", "tidur"),
    ("bubu", "tidur"),
    ("bumil", "ibu hamil"),
    ("bw", "bawa"),
    ("bwt", "buat"),
    ("byk", "banyak"),
    ("byrin", "bayarkan"),
    ("cabal", "sabar"),
    ("cadas", "keren"),
    ("calo", "makelar"),
    ("can", "belum"),
    ("capcus", "pergi"),
    ("caper", "cari perhatian"),
    ("ce", "cewek"),
    ("cekal", "cegah tangkal"),
    ("cemen", "penakut"),
    ("cengengesan", "tertawa"),
    ("cepet", "cepat"),
    ("cew", "cewek"),
    ("chuyunk", "sayang"),
    ("cimeng", "ganja"),
    ("ciyh", "sih"),
    ("ckepp", "cakep"),
    ("ckp", "cakep"),
    ("cmiiw", "correct me if i'm wrong"),
    ("cmpur", "campur"),
    ("cod", "bayar ditempat"),
    ("cong", "banci"),
    ("conlok", "cinta lokasi"),
    ("cowwyy", "maaf"),
    ("cp", "siapa"),
    ("cpe", "capek"),
    ("cppe", "capek"),
    ("cr", "sumber"),
    ("cucok", "cocok"),
    ("cuex", "cuek"),
    ("cumi", "Cuma miscall"),
    ("cups", "culun"),
    ("curanmor", "pencurian kendaraan bermotor"),
    ("curcol", "curahan hati colongan"),
    ("cwek", "cewek"),
    ("cyin", "cinta"),
    ("d", "di"),
    ("dah", "deh"),
    ("dapet", "dapat"),
    ("de", "adik"),
    ("dek", "adik"),
    ("demen", "suka"),
    ("deyh", "deh"),
    ("dgn", "dengan"),
    ("diancurin", "dihancurkan"),
    ("dimaafin", "dimaafkan"),
    ("dimintak", "diminta"),
    ("disono", "di sana"),
    ("dket", "dekat"),
    ("dkk", "dan kawan-kawan"),
    ("dlu", "dulu"),
    ("dngn", "dengan"),
    ("dodol", "bodoh"),
    ("doku", "uang"),
    ("dongs", "dong"),
    ("dpt", "dapat"),
    ("dri", "dari"),
    ("drmn", "darimana"),
    ("drtd", "dari tadi"),
    ("dst", "dan seterusnya"),
    ("dtg", "datang"),
    ("duh", "aduh"),
    ("duren", "durian"),
    ("ed", "edisi"),
    ("egp", "emang gue pikirin"),
    ("eke", "aku"),
    ("elu", "kamu"),
    ("emangnya", "memangnya"),
    ("emng", "memang"),
    ("endak", "tidak"),
    ("enggak", "tidak"),
    ("envy", "iri"),
    ("ex", "mantan"),
    ("fax", "facsimile"),
    ("fifo", "first in first out"),
    ("folbek", "follow back"),
    ("fyi", "sebagai informasi"),
    ("gaada", "tidak ada uang"),
    ("gag", "tidak"),
    ("gaje", "tidak jelas"),
    ("gan", "juragan"),
    ("gaptek", "gagap teknologi"),
    ("gatek", "gagap teknologi"),
    ("gawe", "kerja"),
    ("gbs", "tidak bisa"),
    ("gebetan", "orang yang disuka"),
    ("geje", "tidak jelas"),
    ("gepeng", "gelandangan dan pengemis"),
    ("ghiy", "lagi"),
    ("gile", "gila"),
    ("gimana", "bagaimana"),
    ("gino", "gigi nongol"),
    ("githu", "gitu"),
    ("gj", "tidak jelas"),
    ("gmana", "bagaimana"),
    ("gn", "begini"),
    ("goblok", "bodoh"),
    ("golput", "golongan putih"),
    ("gowes", "mengayuh sepeda"),
    ("gpny", "tidak punya"),
    ("gr", "gede rasa"),
    ("gretongan", "gratisan"),
    ("gtau", "tidak tahu"),
    ("gua", "saya"),
    ("guoblok", "goblok"),
    ("gw", "saya"),
    ("ha", "tertawa"),
    ("haha", "tertawa"),
    ("hallow", "halo"),
    ("hankam", "pertahanan dan keamanan"),
    ("hehe", "he"),
    ("helo", "halo"),
    ("hey", "hai"),
    ("hlm", "halaman"),
    ("hny", "hanya"),
    ("hoax", "isu bohong"),
    ("hr", "hari"),
    ("hrus", "harus"),
    ("hubdar", "perhubungan darat"),
    ("huff", "mengeluh"),
    ("hum", "rumah"),
    ("humz", "rumah"),
    ("ilang", "hilang"),
    ("ilfil", "tidak suka"),
    ("imho", "in my humble opinion"),
    ("imoetz", "imut"),
    ("indo", "indonesia"),
    ("item", "hitam"),
    ("itungan", "hitungan"),
    ("iye", "iya"),
    ("ja", "saja"),
    ("jadiin", "jadi"),
    ("jaim", "jaga image"),
    ("jayus", "tidak lucu"),
    ("jdi", "jadi"),
    ("jem", "jam"),
    ("jga", "juga"),
    ("jgnkan", "jangankan"),
    ("jir", "anjing"),
    ("jln", "jalan"),
    ("jomblo", "tidak punya pacar"),
    ("jubir", "juru bicara"),
    ("jutek", "galak"),
    ("k", "ke"),
    ("kab", "kabupaten"),
    ("kabor", "kabur"),
    ("kacrut", "kacau"),
    ("kadiv", "kepala divisi"),
    ("kagak", "tidak"),
    ("kalo", "kalau"),
    ("kampret", "sialan"),
    ("kamtibmas", "keamanan dan ketertiban masyarakat"),
    ("kamuwh", "kamu"),
    ("kanwil", "kantor wilayah"),
    ("karna", "karena"),
    ("kasubbag", "kepala subbagian"),
    ("katrok", "kampungan"),
    ("kayanya", "kayaknya"),
    ("kbr", "kabar"),
    ("kdu", "harus"),
    ("kec", "kecamatan"),
    ("kejurnas", "kejuaraan nasional"),
    ("kekeuh", "keras kepala"),
    ("kel", "kelurahan"),
    ("kemaren", "kemarin"),
    ("kepengen", "mau"),
    ("kepingin", "mau"),
    ("kepsek", "kepala sekolah"),
    ("kesbang", "kesatuan bangsa"),
    ("kesra", "kesejahteraan rakyat"),
    ("ketrima", "diterima"),
    ("kgiatan", "kegiatan"),
    ("kibul", "bohong"),
    ("kimpoi", "kawin"),
    ("kl", "kalau"),
    ("klianz", "kalian"),
    ("kloter", "kelompok terbang"),
    ("klw", "kalau"),
    ("km", "kamu"),
    ("kmps", "kampus"),
    ("kmrn", "kemarin"),
    ("knal", "kenal"),
    ("knp", "kenapa"),
    ("kodya", "kota madya"),
    ("komdis", "komisi disiplin"),
    ("komsov", "komunis sovyet"),
    ("kongkow", "kumpul bareng teman-teman"),
    ("kopdar", "kopi darat"),
    ("korup", "korupsi"),
    ("kpn", "kapan"),
    ("krenz", "keren"),
    ("krm", "kirim"),
    ("kt", "kita"),
    ("ktmu", "ketemu"),
    ("ktr", "kantor"),
    ("kuper", "kurang pergaulan"),
    ("kw", "imitasi"),
    ("kyk", "seperti"),
    ("la", "lah"),
    ("lam", "salam"),
    ("lamp", "lampiran"),
    ("lanud", "landasan udara"),
    ("latgab", "latihan gabungan"),
    ("lebay", "berlebihan"),
    ("leh", "boleh"),
    ("lelet", "lambat"),
    ("lemot", "lambat"),
    ("lgi", "lagi"),
    ("lgsg", "langsung"),
    ("liat", "lihat"),
    ("litbang", "penelitian dan pengembangan"),
    ("lmyn", "lumayan"),
    ("lo", "kamu"),
    ("loe", "kamu"),
    ("lola", "lambat berfikir"),
    ("louph", "cinta"),
    ("low", "kalau"),
    ("lp", "lupa"),
    ("luber", "langsung, umum, bebas, dan rahasia"),
    ("luchuw", "lucu"),
    ("lum", "belum"),
    ("luthu", "lucu"),
    ("lwn", "lawan"),
    ("maacih", "terima kasih"),
    ("mabal", "bolos"),
    ("macem", "macam"),
    ("macih", "masih"),
    ("maem", "makan"),
    ("magabut", "makan gaji buta"),
    ("maho", "homo"),
    ("maks", "maksimal"),
    ("maksain", "memaksa"),
    ("malem", "malam"),
    ("mam", "makan"),
    ("maneh", "kamu"),
    ("maniez", "manis"),
    ("mao", "mau"),
    ("masi", "masih"),
    ("masukin", "masukkan"),
    ("melu", "ikut"),
    ("mepet", "dekat sekali"),
    ("mgu", "minggu"),
    ("migas", "minyak dan gas bumi"),
    ("mikol", "minuman beralkohol"),
    ("miras", "minuman keras"),
    ("mlah", "malah"),
    ("mngkn", "mungkin"),
    ("mo", "mau"),
    ("mokad", "mati"),
    ("moso", "masa"),
    ("mpe", "sampai"),
    ("msk", "masuk"),
    ("mslh", "masalah"),
    ("mt", "makan teman"),
    ("mubes", "musyawarah besar"),
    ("mulu", "melulu"),
    ("mumpung", "selagi"),
    ("munas", "musyawarah nasional"),
    ("muntaber", "muntah dan berak"),
    ("musti", "mesti"),
    ("muupz", "maaf"),
    ("mw", "now watching"),
    ("n", "dan"),
    ("nanam", "menanam"),
    ("nanya", "bertanya"),
    ("napa", "kenapa"),
    ("napi", "narapidana"),
    ("napza", "narkotika, alkohol, psikotropika, dan zat adiktif "),
    ("narkoba", "narkotika, psikotropika, dan obat terlarang"),
    ("nasgor", "nasi goreng"),
    ("nda", "tidak"),
    ("ndiri", "sendiri"),
    ("ne", "ini"),
    ("nekolin", "neokolonialisme"),
    ("nembak", "menyatakan cinta"),
    ("ngabuburit", "menunggu berbuka puasa"),
    ("ngaku", "mengaku"),
    ("ngambil", "mengambil"),
    ("nganggur", "tidak punya pekerjaan"),
    ("ngapah", "kenapa"),
    ("ngaret", "terlambat"),
    ("ngasih", "memberikan"),
    ("ngebandel", "berbuat bandel"),
    ("ngegosip", "bergosip"),
    ("ngeklaim", "mengklaim"),
    ("ngeksis", "menjadi eksis"),
    ("ngeles", "berkilah"),
    ("ngelidur", "menggigau"),
    ("ngerampok", "merampok"),
    ("ngga", "tidak"),
    ("ngibul", "berbohong"),
    ("ngiler", "mau"),
    ("ngiri", "iri"),
    ("ngisiin", "mengisikan"),
    ("ngmng", "bicara"),
    ("ngomong", "bicara"),
    ("ngurus", "mengurus"),
    ("nie", "ini"),
    ("nih", "ini"),
    ("niyh", "nih"),
    ("nmr", "nomor"),
    ("nntn", "nonton"),
    ("nobar", "nonton bareng"),
    ("np", "now playing"),
    ("ntar", "nanti"),
    ("ntn", "nonton"),
    ("numpuk", "bertumpuk"),
    ("nutupin", "menutupi"),
    ("nyari", "mencari"),
    ("nyekar", "menyekar"),
    ("nyicil", "mencicil"),
    ("nyoblos", "mencoblos"),
    ("nyokap", "ibu"),
    ("ogah", "tidak mau"),
    ("ol", "online"),
    ("ongkir", "ongkos kirim"),
    ("oot", "out of topic"),
    ("ortu", "orang tua"),
    ("otda", "otonomi daerah"),
    ("otw", "on the way, sedang di jalan"),
    ("pacal", "pacar"),
    ("pake", "pakai"),
    ("pala", "kepala"),
    ("pansus", "panitia khusus"),
    ("parpol", "partai politik"),
    ("pasutri", "pasangan suami istri"),
    ("pd", "pada"),
    ("pede", "percaya diri"),
    ("pelatnas", "pemusatan latihan nasional"),
    ("pemda", "pemerintah daerah"),
    ("pemkot", "pemerintah kota"),
    ("pemred", "pemimpin redaksi"),
    ("penjas", "pendidikan jasmani"),
    ("perda", "peraturan daerah"),
    ("perhatiin", "perhatikan"),
    ("pesenan", "pesanan"),
    ("pgang", "pegang"),
    ("pi", "tapi"),
    ("pilkada", "pemilihan kepala daerah"),
    ("pisan", "sangat"),
    ("pk", "penjahat kelamin"),
    ("plg", "paling"),
    ("plis", "tolong"),
    ("plisss", "tolong"),
    ("pls", "tolong"),
    ("pmrnth", "pemerintah"),
    ("polantas", "polisi lalu lintas"),
    ("ponpes", "pondok pesantren"),
    ("pp", "pulang pergi"),
    ("prg", "pergi"),
    ("prnh", "pernah"),
    ("psen", "pesan"),
    ("pst", "pasti"),
    ("pswt", "pesawat"),
    ("pw", "posisi nyaman"),
    ("qmu", "kamu"),
    ("rakor", "rapat koordinasi"),
    ("ranmor", "kendaraan bermotor"),
    ("re", "reply"),
    ("ref", "referensi"),
    ("rehab", "rehabilitasi"),
    ("rempong", "sulit"),
    ("repp", "balas"),
    ("restik", "reserse narkotika"),
    ("rhs", "rahasia"),
    ("rmh", "rumah"),
    ("rv", "redvelvet"),
    ("wtb", "beli"),
    ("wts", "jual"),
    ("wtt", "tukar"),
];

/// Lowercase slang token -> normalized replacement.
pub static SLANG: LazyLock<HashMap<&'static str, String>> = LazyLock::new(|| {
    let raw: HashMap<&str, &str> = RAW_SLANG.iter().copied().collect();
    raw.iter()
        .map(|(&key, &value)| (key, resolve(&raw, value, 0)))
        .collect()
});

fn resolve(raw: &HashMap<&str, &str>, value: &str, depth: usize) -> String {
    let cleaned = super::case_fold(&super::clean(value));
    cleaned
        .split_whitespace()
        .map(|word| match raw.get(word) {
            Some(next) if depth < MAX_RESOLVE_DEPTH => resolve(raw, next, depth + 1),
            _ => word.to_string(),
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replacement for a single token, if it is slang.
pub fn lookup(token: &str) -> Option<&'static str> {
    SLANG.get(token.to_lowercase().as_str()).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_lookup() {
        assert_eq!(lookup("bgt"), Some("banget"));
        assert_eq!(lookup("ad"), Some("ada"));
        assert_eq!(lookup("BGT"), Some("banget"));
        assert_eq!(lookup("rumah"), None);
    }

    #[test]
    fn test_chained_slang_is_resolved() {
        // niyh -> nih -> ini
        assert_eq!(lookup("niyh"), Some("ini"));
        // ahaha -> haha -> tertawa
        assert_eq!(lookup("ahaha"), Some("tertawa"));
    }

    #[test]
    fn test_values_are_pre_cleaned() {
        // Punctuation and hyphens are gone, case is folded.
        assert_eq!(lookup("dkk"), Some("dan kawan kawan"));
        assert_eq!(lookup("cumi"), Some("cuma miscall"));
        assert_eq!(lookup("otw"), Some("on the way sedang di jalan"));
    }

    #[test]
    fn test_values_have_enclitics_split() {
        assert_eq!(lookup("bknnya"), Some("bukan nya"));
    }

    #[test]
    fn test_no_value_contains_a_slang_key() {
        for (key, value) in SLANG.iter() {
            for word in value.split_whitespace() {
                assert!(
                    !SLANG.contains_key(word),
                    "value of {key:?} still contains slang word {word:?}"
                );
            }
        }
    }

    #[test]
    fn test_no_value_has_stray_whitespace() {
        for value in SLANG.values() {
            assert_eq!(value.trim(), value);
            assert!(!value.contains("  "));
        }
    }
}
