//! Built-in agreement text.

pub(super) const EN: &[(&str, &str)] = &[
    ("title", "Laboratory Safety Agreement"),
    (
        "instruction",
        "Read the rules below, fill in your details, and sign in the box.",
    ),
    (
        "rules",
        "1. Wear safety goggles at all times while experiments are in progress, including during cleanup.\n\
         2. Eating, drinking, and chewing gum are not permitted anywhere in the laboratory.\n\
         3. Tie back long hair, remove dangling jewelry, and wear closed-toe shoes.\n\
         4. Never perform an experiment that has not been approved by the instructor.\n\
         5. Report every spill, cut, burn, or broken piece of glassware to the instructor immediately, however minor it seems.\n\
         6. Know the location of the eyewash station, safety shower, fire extinguisher, and first aid kit.\n\
         7. Dispose of chemicals only as directed. Never pour anything down the sink unless told to do so.\n\
         8. Wash your hands with soap and water before leaving the laboratory.\n\
         \n\
         Violating these rules may result in removal from the laboratory and loss of lab privileges.",
    ),
    ("name_label", "Name"),
    ("organization_label", "Class / Organization"),
    ("date_label", "Date"),
    (
        "declaration",
        "I have read and understood the laboratory safety rules above, and I agree to follow them at all times.",
    ),
    ("signature_label", "Signature"),
    ("submit_label", "Sign and Download"),
    ("clear_label", "Clear Signature"),
    (
        "incomplete_warning",
        "Please enter your name and organization before signing.",
    ),
    (
        "blank_signature_warning",
        "The signature box is empty. The document will be generated without a signature.",
    ),
    (
        "font_warning",
        "The document font could not be loaded; some characters may not display correctly.",
    ),
];

pub(super) const ZH_TW: &[(&str, &str)] = &[
    ("title", "實驗室安全同意書"),
    ("instruction", "請詳閱以下規則，填寫個人資料後於框內簽名。"),
    (
        "rules",
        "1. 進行實驗期間（包含清理時）須全程配戴護目鏡。\n\
         2. 實驗室內禁止飲食及嚼食口香糖。\n\
         3. 長髮須綁起，勿配戴垂掛式飾品，並穿著包鞋。\n\
         4. 未經老師核准，不得進行任何實驗。\n\
         5. 任何化學品潑灑、割傷、燙傷或玻璃器皿破損，無論大小，皆須立即報告老師。\n\
         6. 熟知洗眼器、緊急沖淋設備、滅火器及急救箱的位置。\n\
         7. 依指示處理化學廢棄物，未經允許不得倒入水槽。\n\
         8. 離開實驗室前須以肥皂洗手。\n\
         \n\
         違反上述規則者，將被請離實驗室並喪失實驗資格。",
    ),
    ("name_label", "姓名"),
    ("organization_label", "班級／單位"),
    ("date_label", "日期"),
    (
        "declaration",
        "本人已詳閱並了解上述實驗室安全規則，同意隨時遵守。",
    ),
    ("signature_label", "簽名"),
    ("submit_label", "簽署並下載"),
    ("clear_label", "清除簽名"),
    ("incomplete_warning", "簽名前請先填寫姓名及班級／單位。"),
    (
        "blank_signature_warning",
        "簽名框為空白，文件將在沒有簽名的情況下產生。",
    ),
    (
        "font_warning",
        "無法載入中文字型，文件中的中文可能無法正確顯示。",
    ),
];
