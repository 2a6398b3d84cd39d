//! Built-in radical catalog.
//!
//! Columns: category, name, radical, primary sample, alternate samples,
//! topology, default ratio. Alternates are tried in order when the font
//! lacks the primary sample.

use crate::types::{Category, Category::*, SplitTopology, SplitTopology::*};

pub(super) type RawEntry = (
    Category,
    &'static str,
    char,
    char,
    &'static [char],
    SplitTopology,
    f32,
);

pub(super) static BUILTIN_ENTRIES: &[RawEntry] = &[
    // Hen
    (Hen, "にんべん", '亻', '仁', &['休', '体'], Left, 0.35),
    (Hen, "ぎょうにんべん", '彳', '行', &['役', '往'], Left, 0.3),
    (Hen, "りっしんべん", '忄', '情', &['性', '快'], Left, 0.3),
    (Hen, "てへん", '扌', '持', &['指', '打'], Left, 0.35),
    (Hen, "さんずい", '氵', '海', &['池', '河'], Left, 0.3),
    (Hen, "ごんべん", '訁', '語', &['話', '読'], Left, 0.4),
    (Hen, "くちへん", '口', '呼', &['味', '吸'], Left, 0.4),
    (Hen, "きへん", '木', '林', &['村', '校'], Left, 0.4),
    (Hen, "のぎへん", '禾', '秋', &['私', '科'], Left, 0.4),
    (Hen, "かねへん", '金', '鉄', &['銀', '鉛'], Left, 0.45),
    (Hen, "いしへん", '石', '砂', &['研', '破'], Left, 0.4),
    (Hen, "いとへん", '糸', '結', &['紙', '線'], Left, 0.45),
    (Hen, "ころもへん", '衤', '被', &['補', '複'], Left, 0.35),
    (Hen, "しょくへん", '飠', '館', &['飯', '飲'], Left, 0.4),
    (Hen, "けものへん", '犭', '狼', &['猫', '独'], Left, 0.35),
    (Hen, "うおへん", '魚', '鮮', &['鯨', '鮎'], Left, 0.5),
    (Hen, "むしへん", '虫', '蛇', &['蚊', '蝶'], Left, 0.4),
    (Hen, "つちへん", '土', '城', &['地', '坂'], Left, 0.35),
    (Hen, "やまへん", '山', '峰', &['峠', '岐'], Left, 0.4),
    (Hen, "ひへん", '火', '灯', &['畑', '焼'], Left, 0.35),
    (Hen, "にすい", '冫', '冷', &['次', '凍'], Left, 0.25),
    (Hen, "にくづき", '月', '胸', &['腕', '脈'], Left, 0.4),
    (Hen, "ほねへん", '骨', '骸', &['髄'], Left, 0.5),
    (Hen, "めへん", '目', '眼', &['眠', '睡'], Left, 0.4),
    (Hen, "みみへん", '耳', '聴', &['職', '取'], Left, 0.4),
    (Hen, "みへん", '身', '躯', &['躾'], Left, 0.4),
    (Hen, "やまいだれへん", '疒', '病', &[], Left, 0.3),
    (Hen, "おんなへん", '女', '妹', &['姉', '始'], Left, 0.4),
    (Hen, "こざとへん", '阝', '防', &['陽', '院'], Left, 0.3),
    (Hen, "しめすへん", '礻', '祈', &['神', '社'], Left, 0.35),
    (Hen, "ゆみへん", '弓', '張', &['強', '引'], Left, 0.35),
    (Hen, "かわへん", '革', '靴', &['鞍'], Left, 0.45),
    (Hen, "かいへん", '貝', '販', &['財', '賊'], Left, 0.4),
    (Hen, "あしへん", '足', '跡', &['路', '距'], Left, 0.45),
    (Hen, "くるまへん", '車', '輪', &['転', '軽'], Left, 0.45),
    (Hen, "さけのとり", '酉', '配', &['酒', '酢'], Left, 0.4),
    (Hen, "うしへん", '牛', '牡', &['物', '特'], Left, 0.4),
    (Hen, "ちからへん", '力', '加', &[], Left, 0.35),
    (Hen, "まめへん", '豆', '豉', &[], Left, 0.4),
    (Hen, "ぶたへん", '豕', '豚', &[], Left, 0.4),
    // Tsukuri
    (Tsukuri, "おおざと", '阝', '部', &['都', '郡'], Right, 0.7),
    (Tsukuri, "りっとう", '刂', '則', &['刻', '列'], Right, 0.7),
    (Tsukuri, "ちから", '力', '助', &['動', '功'], Right, 0.65),
    (Tsukuri, "おおがい", '頁', '順', &['顔', '題'], Right, 0.55),
    (Tsukuri, "ぼくづくり", '攵', '政', &['数', '教'], Right, 0.65),
    (Tsukuri, "ふるとり", '隹', '雑', &['雄', '難'], Right, 0.6),
    (Tsukuri, "とり", '鳥', '鳩', &['鶏'], Right, 0.55),
    (Tsukuri, "うま", '馬', '駅', &[], Right, 0.55),
    (Tsukuri, "しか", '鹿', '麗', &[], Right, 0.55),
    (Tsukuri, "きづくり", '斤', '新', &['斬', '断'], Right, 0.65),
    (Tsukuri, "ほこづくり", '戈', '成', &[], Right, 0.6),
    (Tsukuri, "おのづくり", '斤', '所', &[], Right, 0.65),
    (Tsukuri, "かたな", '刀', '切', &[], Right, 0.65),
    (Tsukuri, "ほこ", '殳', '殴', &[], Right, 0.6),
    (Tsukuri, "ふでづくり", '聿', '律', &[], Right, 0.6),
    (Tsukuri, "ぼく", '攴', '牧', &[], Right, 0.65),
    (Tsukuri, "おおざと右", '邑', '郎', &[], Right, 0.6),
    (Tsukuri, "おうへん", '王', '珠', &[], Right, 0.6),
    (Tsukuri, "つき", '月', '朝', &[], Right, 0.6),
    (Tsukuri, "ひ", '日', '旧', &[], Right, 0.6),
    (Tsukuri, "かぜ", '風', '颯', &[], Right, 0.55),
    (Tsukuri, "みる", '見', '規', &['視', '親'], Right, 0.6),
    (Tsukuri, "きく", '音', '韻', &[], Right, 0.55),
    (Tsukuri, "あくび", '欠', '歌', &['欧', '次'], Right, 0.65),
    (Tsukuri, "むぎ", '麦', '麺', &[], Right, 0.55),
    (Tsukuri, "まめ", '豆', '豊', &[], Right, 0.6),
    (Tsukuri, "おおがい頁", '頁', '頭', &[], Right, 0.55),
    (Tsukuri, "おに", '鬼', '魅', &[], Right, 0.55),
    (Tsukuri, "かい右", '貝', '頁', &[], Right, 0.6),
    (Tsukuri, "ふ", '阜', '陸', &[], Right, 0.6),
    (Tsukuri, "けん", '見', '視', &[], Right, 0.6),
    (Tsukuri, "せい", '斉', '済', &[], Right, 0.6),
    (Tsukuri, "き", '气', '気', &[], Right, 0.6),
    (Tsukuri, "しゅう", '隹', '集', &[], Right, 0.6),
    (Tsukuri, "よう", '羊', '養', &[], Right, 0.6),
    // Kanmuri
    (Kanmuri, "くさかんむり", '艹', '花', &['草', '茶'], Top, 0.3),
    (Kanmuri, "たけかんむり", '⺮', '笑', &['答', '算'], Top, 0.35),
    (Kanmuri, "あめかんむり", '雨', '雷', &['雲', '電'], Top, 0.4),
    (Kanmuri, "やまかんむり", '山', '崩', &[], Top, 0.35),
    (Kanmuri, "うかんむり", '宀', '宇', &['安', '家'], Top, 0.25),
    (Kanmuri, "あなかんむり", '穴', '空', &['窓', '究'], Top, 0.35),
    (Kanmuri, "わかんむり", '冖', '冠', &['写', '軍'], Top, 0.25),
    (Kanmuri, "あみがしら", '罒', '買', &['罪', '置'], Top, 0.3),
    (Kanmuri, "よこめ", '⺫', '置', &[], Top, 0.3),
    (Kanmuri, "なべぶた", '亠', '市', &['京', '交'], Top, 0.2),
    (Kanmuri, "はちがしら", '八', '公', &['分'], Top, 0.25),
    (Kanmuri, "ひとやね", '𠆢', '会', &['今', '全'], Top, 0.2),
    (Kanmuri, "つめかんむり", '爫', '受', &['愛'], Top, 0.3),
    (Kanmuri, "てんてん", '⺀', '当', &[], Top, 0.25),
    (Kanmuri, "しょうがしら", '⺌', '尚', &['党', '堂'], Top, 0.25),
    (Kanmuri, "だいかんむり", '大', '奇', &[], Top, 0.3),
    (Kanmuri, "ひとがしら", '人', '介', &[], Top, 0.25),
    (Kanmuri, "けいがしら", '⺕', '前', &[], Top, 0.3),
    (Kanmuri, "おいがしら", '老', '考', &['者'], Top, 0.35),
    (Kanmuri, "ちいさい", '小', '尖', &[], Top, 0.3),
    (Kanmuri, "そうにょう", '⺍', '学', &['覚', '栄'], Top, 0.25),
    (Kanmuri, "なつあし上", '夂', '条', &[], Top, 0.3),
    (Kanmuri, "かぜがまえ", '風', '風', &[], Top, 0.4),
    (Kanmuri, "おおいかんむり", '覀', '要', &[], Top, 0.35),
    (Kanmuri, "あめ", '雨', '雪', &[], Top, 0.4),
    (Kanmuri, "くち上", '口', '吉', &[], Top, 0.3),
    (Kanmuri, "つち上", '土', '吉', &[], Top, 0.3),
    (Kanmuri, "くさ", '艸', '草', &[], Top, 0.3),
    // Ashi
    (Ashi, "こころ", '心', '念', &['思', '忠'], Bottom, 0.65),
    (Ashi, "れっか", '灬', '熱', &['然', '照'], Bottom, 0.75),
    (Ashi, "ひとあし", '儿', '児', &['元', '先'], Bottom, 0.7),
    (Ashi, "したごころ", '心', '恋', &[], Bottom, 0.7),
    (Ashi, "したみず", '水', '泰', &[], Bottom, 0.7),
    (Ashi, "さら", '皿', '盛', &['盆', '益'], Bottom, 0.7),
    (Ashi, "こうあし", '儿', '兄', &[], Bottom, 0.7),
    (Ashi, "したひ", '灬', '煮', &[], Bottom, 0.75),
    (Ashi, "かい", '貝', '買', &['貨', '貸'], Bottom, 0.65),
    (Ashi, "こころあし", '心', '慕', &[], Bottom, 0.7),
    (Ashi, "したしたごころ", '灬', '点', &[], Bottom, 0.75),
    (Ashi, "れんが", '灬', '煎', &[], Bottom, 0.75),
    // Nyou
    (Nyou, "しんにょう", '辶', '近', &['返', '通'], LeftBottom, 0.6),
    (Nyou, "えんにょう", '廴', '延', &['廷'], LeftBottom, 0.55),
    (Nyou, "そうにょう走", '走', '起', &['越', '超'], LeftBottom, 0.65),
    (Nyou, "えんにょう廴", '廴', '建', &[], LeftBottom, 0.55),
    (Nyou, "かんにょう", '⻎', '道', &[], LeftBottom, 0.65),
    // Tare
    (Tare, "がんだれ", '厂', '原', &['厚'], TopLeft, 0.5),
    (Tare, "まだれ", '广', '広', &['庫', '店'], TopLeft, 0.45),
    (Tare, "やまいだれ", '疒', '痛', &['病', '疲'], TopLeft, 0.45),
    (Tare, "とだれ", '戶', '戻', &[], TopLeft, 0.5),
    (Tare, "しかばねだれ", '尸', '局', &['届', '居'], TopLeft, 0.45),
    (Tare, "かばねだれ", '尸', '屋', &[], TopLeft, 0.45),
    (Tare, "とびがしら", '飛', '飛', &[], TopLeft, 0.5),
    (Tare, "いわだれ", '厂', '厚', &[], TopLeft, 0.45),
    (Tare, "たれ", '广', '店', &[], TopLeft, 0.45),
    (Tare, "がんだれ厂", '厂', '雁', &[], TopLeft, 0.5),
    // Kamae
    (Kamae, "もんがまえ", '門', '間', &['開', '関'], Frame, 0.5),
    (Kamae, "くにがまえ", '囗', '国', &['回', '図'], Frame, 0.5),
    (Kamae, "どうがまえ", '行', '衛', &[], Frame, 0.5),
    (Kamae, "かくしがまえ", '匸', '匹', &[], Frame, 0.5),
    (Kamae, "はこがまえ", '匚', '匠', &['区', '医'], Frame, 0.45),
    (Kamae, "けいがまえ", '冂', '円', &[], Frame, 0.45),
    (Kamae, "もんがまえ門", '門', '門', &[], Frame, 0.5),
    (Kamae, "とうがまえ", '鬨', '鬥', &[], Frame, 0.5),
    (Kamae, "くがまえ", '句', '句', &[], Frame, 0.45),
    (Kamae, "とかまえ", '戸', '房', &[], Frame, 0.5),
    (Kamae, "むじなへん", '鬼', '魂', &[], Frame, 0.55),
    (Kamae, "しきがまえ", '式', '式', &[], Frame, 0.5),
    (Kamae, "かぜがまえ", '風', '凪', &[], Frame, 0.5),
    (Kamae, "とがまえ", '戸', '扉', &[], Frame, 0.5),
];
