/// All fixed interface strings for a language.
///
/// Content that comes from the CMS is localized through the resolver; these
/// are only the labels the site itself owns. Strings are raw text and are
/// HTML-escaped at render time.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Document Head ====================
    /// Site title used in `<title>` and as the suffix of page titles
    pub site_title: &'static str,

    /// Meta description
    pub site_description: &'static str,

    // ==================== Navigation ====================
    pub home: &'static str,
    pub menu: &'static str,
    pub language: &'static str,

    // ==================== Search ====================
    pub search: &'static str,
    pub search_title: &'static str,
    pub search_placeholder: &'static str,

    /// Placeholders: {query}
    pub search_results_for: &'static str,
    pub search_no_results: &'static str,

    // ==================== Error States ====================
    /// Full-page error when layout resources cannot be loaded
    pub load_error_title: &'static str,
    pub load_error_hint: &'static str,
    pub retry: &'static str,
    pub reload: &'static str,

    /// Error shown inside the layout when a single page fails to load
    pub page_error_title: &'static str,

    pub not_found_title: &'static str,
    pub not_found_text: &'static str,
    pub back_home: &'static str,

    // ==================== News ====================
    pub news: &'static str,
    pub filter_all: &'static str,
    pub filter_news: &'static str,
    pub filter_announcements: &'static str,
    pub news_empty: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub read_more: &'static str,

    // ==================== Page Sections ====================
    pub latest_news: &'static str,
    pub announcements: &'static str,
    pub scientific_directions: &'static str,
    pub postgraduate_programs: &'static str,
    pub partners: &'static str,
    pub laboratories: &'static str,
    pub departments: &'static str,
    pub employees: &'static str,
    pub documents: &'static str,
    pub gallery: &'static str,
    pub duration: &'static str,
    pub direction: &'static str,

    // ==================== Contact Form ====================
    pub contact_title: &'static str,
    pub contact_name: &'static str,
    pub contact_phone: &'static str,
    pub contact_message: &'static str,
    pub contact_submit: &'static str,
    pub contact_success: &'static str,
    pub contact_failed: &'static str,
    pub contact_name_invalid: &'static str,
    pub contact_phone_invalid: &'static str,
    pub contact_message_invalid: &'static str,

    // ==================== Footer ====================
    pub contacts: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,

    /// Placeholders: {year}
    pub rights_reserved: &'static str,
}

// ==================== Uzbek Strings ====================

/// Uzbek language strings (primary)
pub const UZBEK_STRINGS: LanguageStrings = LanguageStrings {
    site_title: "Neft va gaz konlari geologiyasi hamda qidiruvi instituti",
    site_description: "Neft va gaz konlari geologiyasi hamda qidiruvi instituti: O'zbekistonda neft-gaz sohasidagi ilmiy va amaliy tadqiqotlar.",

    home: "Bosh sahifa",
    menu: "Menyu",
    language: "Til",

    search: "Qidirish",
    search_title: "Sayt bo'ylab qidiruv",
    search_placeholder: "Nima qidiryapsiz?",
    search_results_for: "\"{query}\" bo'yicha natijalar",
    search_no_results: "Hech narsa topilmadi.",

    load_error_title: "Sayt ma'lumotlarini yuklashda xatolik yuz berdi",
    load_error_hint: "Iltimos, internetingizni tekshiring yoki keyinroq qayta urinib ko'ring.",
    retry: "Qayta yuklash",
    reload: "Sahifani yangilash",

    page_error_title: "Sahifani yuklashda xatolik yuz berdi",

    not_found_title: "Sahifa topilmadi",
    not_found_text: "Siz qidirayotgan sahifa mavjud emas yoki ko'chirilgan.",
    back_home: "Bosh sahifaga qaytish",

    news: "Yangiliklar",
    filter_all: "Barchasi",
    filter_news: "Yangiliklar",
    filter_announcements: "E'lonlar",
    news_empty: "Hozircha yangiliklar yo'q.",
    previous: "Oldingi",
    next: "Keyingi",
    read_more: "Batafsil",

    latest_news: "So'nggi yangiliklar",
    announcements: "E'lonlar",
    scientific_directions: "Ilmiy yo'nalishlar",
    postgraduate_programs: "Oliy ta'limdan keyingi ta'lim",
    partners: "Hamkorlar",
    laboratories: "Laboratoriyalar",
    departments: "Bo'limlar",
    employees: "Xodimlar",
    documents: "Hujjatlar",
    gallery: "Galereya",
    duration: "Davomiyligi",
    direction: "Yo'nalish",

    contact_title: "Biz bilan bog'laning",
    contact_name: "Ismingiz",
    contact_phone: "Telefon raqamingiz",
    contact_message: "Xabaringiz",
    contact_submit: "Yuborish",
    contact_success: "Arizangiz qabul qilindi. Tez orada siz bilan bog'lanamiz.",
    contact_failed: "Xabarni yuborishda xatolik yuz berdi. Keyinroq qayta urinib ko'ring.",
    contact_name_invalid: "Ism kamida 2 ta harfdan iborat bo'lishi kerak.",
    contact_phone_invalid: "Telefon raqami kamida 9 ta raqamdan iborat bo'lishi kerak.",
    contact_message_invalid: "Xabar kamida 5 ta harfdan iborat bo'lishi kerak.",

    contacts: "Kontaktlar",
    address: "Manzil",
    phone: "Telefon",
    email: "Elektron pochta",
    rights_reserved: "© {year} Barcha huquqlar himoyalangan.",
};

// ==================== Russian Strings ====================

pub const RUSSIAN_STRINGS: LanguageStrings = LanguageStrings {
    site_title: "Институт геологии и разведки нефтяных и газовых месторождений",
    site_description: "Институт геологии и разведки нефтяных и газовых месторождений: научные и прикладные исследования в нефтегазовой отрасли Узбекистана.",

    home: "Главная",
    menu: "Меню",
    language: "Язык",

    search: "Поиск",
    search_title: "Поиск по сайту",
    search_placeholder: "Что вы ищете?",
    search_results_for: "Результаты по запросу \"{query}\"",
    search_no_results: "Ничего не найдено.",

    load_error_title: "Произошла ошибка при загрузке данных сайта",
    load_error_hint: "Пожалуйста, проверьте подключение к интернету или попробуйте позже.",
    retry: "Повторить",
    reload: "Обновить страницу",

    page_error_title: "Не удалось загрузить страницу",

    not_found_title: "Страница не найдена",
    not_found_text: "Страница, которую вы ищете, не существует или была перемещена.",
    back_home: "Вернуться на главную",

    news: "Новости",
    filter_all: "Все",
    filter_news: "Новости",
    filter_announcements: "Объявления",
    news_empty: "Пока нет новостей.",
    previous: "Назад",
    next: "Далее",
    read_more: "Подробнее",

    latest_news: "Последние новости",
    announcements: "Объявления",
    scientific_directions: "Научные направления",
    postgraduate_programs: "Послевузовское образование",
    partners: "Партнёры",
    laboratories: "Лаборатории",
    departments: "Отделы",
    employees: "Сотрудники",
    documents: "Документы",
    gallery: "Галерея",
    duration: "Продолжительность",
    direction: "Направление",

    contact_title: "Свяжитесь с нами",
    contact_name: "Ваше имя",
    contact_phone: "Ваш номер телефона",
    contact_message: "Ваше сообщение",
    contact_submit: "Отправить",
    contact_success: "Ваша заявка принята. Мы скоро свяжемся с вами.",
    contact_failed: "Не удалось отправить сообщение. Попробуйте позже.",
    contact_name_invalid: "Имя должно содержать не менее 2 букв.",
    contact_phone_invalid: "Номер телефона должен содержать не менее 9 цифр.",
    contact_message_invalid: "Сообщение должно содержать не менее 5 символов.",

    contacts: "Контакты",
    address: "Адрес",
    phone: "Телефон",
    email: "Электронная почта",
    rights_reserved: "© {year} Все права защищены.",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    site_title: "Institute of Geology and Exploration of Oil and Gas Fields",
    site_description: "Institute of Geology and Exploration of Oil and Gas Fields: scientific and applied research in the oil and gas industry of Uzbekistan.",

    home: "Home",
    menu: "Menu",
    language: "Language",

    search: "Search",
    search_title: "Search the site",
    search_placeholder: "What are you looking for?",
    search_results_for: "Results for \"{query}\"",
    search_no_results: "Nothing found.",

    load_error_title: "An error occurred while loading site data",
    load_error_hint: "Please check your internet connection or try again later.",
    retry: "Retry",
    reload: "Reload page",

    page_error_title: "The page could not be loaded",

    not_found_title: "Page not found",
    not_found_text: "The page you are looking for does not exist or has been moved.",
    back_home: "Back to home",

    news: "News",
    filter_all: "All",
    filter_news: "News",
    filter_announcements: "Announcements",
    news_empty: "No news yet.",
    previous: "Previous",
    next: "Next",
    read_more: "Read more",

    latest_news: "Latest news",
    announcements: "Announcements",
    scientific_directions: "Scientific directions",
    postgraduate_programs: "Postgraduate education",
    partners: "Partners",
    laboratories: "Laboratories",
    departments: "Departments",
    employees: "Staff",
    documents: "Documents",
    gallery: "Gallery",
    duration: "Duration",
    direction: "Direction",

    contact_title: "Contact us",
    contact_name: "Your name",
    contact_phone: "Your phone number",
    contact_message: "Your message",
    contact_submit: "Send",
    contact_success: "Your application has been received. We will contact you soon.",
    contact_failed: "The message could not be sent. Please try again later.",
    contact_name_invalid: "Name must be at least 2 characters long.",
    contact_phone_invalid: "Phone number must contain at least 9 digits.",
    contact_message_invalid: "Message must be at least 5 characters long.",

    contacts: "Contacts",
    address: "Address",
    phone: "Phone",
    email: "Email",
    rights_reserved: "© {year} All rights reserved.",
};
