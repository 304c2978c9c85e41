//! Built-in reference lists.

pub(crate) const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "10minutemail.net",
    "20minutemail.com",
    "33mail.com",
    "anonbox.net",
    "burnermail.io",
    "discard.email",
    "dispostable.com",
    "dropmail.me",
    "emailondeck.com",
    "fakeinbox.com",
    "getairmail.com",
    "getnada.com",
    "guerrillamail.biz",
    "guerrillamail.com",
    "guerrillamail.de",
    "guerrillamail.net",
    "guerrillamail.org",
    "guerrillamailblock.com",
    "harakirimail.com",
    "inboxbear.com",
    "incognitomail.org",
    "jetable.org",
    "mailcatch.com",
    "maildrop.cc",
    "mailinator.com",
    "mailinator.net",
    "mailinator2.com",
    "mailnesia.com",
    "mintemail.com",
    "mohmal.com",
    "mytemp.email",
    "nada.email",
    "sharklasers.com",
    "spam4.me",
    "spambox.us",
    "spamgourmet.com",
    "temp-mail.io",
    "temp-mail.org",
    "tempail.com",
    "tempinbox.com",
    "tempmail.com",
    "tempmail.net",
    "tempmailo.com",
    "tempr.email",
    "throwawaymail.com",
    "trashmail.com",
    "trashmail.de",
    "trashmail.net",
    "wegwerfmail.de",
    "yopmail.com",
    "yopmail.fr",
    "yopmail.net",
];

pub(crate) const FREE_PROVIDERS: &[(&str, &str)] = &[
    ("gmail.com", "Gmail"),
    ("googlemail.com", "Gmail"),
    ("yahoo.com", "Yahoo Mail"),
    ("yahoo.co.uk", "Yahoo Mail"),
    ("yahoo.fr", "Yahoo Mail"),
    ("ymail.com", "Yahoo Mail"),
    ("outlook.com", "Outlook"),
    ("hotmail.com", "Outlook"),
    ("hotmail.co.uk", "Outlook"),
    ("live.com", "Outlook"),
    ("msn.com", "Outlook"),
    ("aol.com", "AOL Mail"),
    ("icloud.com", "iCloud Mail"),
    ("me.com", "iCloud Mail"),
    ("mac.com", "iCloud Mail"),
    ("protonmail.com", "Proton Mail"),
    ("proton.me", "Proton Mail"),
    ("pm.me", "Proton Mail"),
    ("zoho.com", "Zoho Mail"),
    ("yandex.com", "Yandex Mail"),
    ("yandex.ru", "Yandex Mail"),
    ("mail.com", "Mail.com"),
    ("gmx.com", "GMX"),
    ("gmx.de", "GMX"),
    ("gmx.net", "GMX"),
    ("web.de", "WEB.DE"),
    ("tutanota.com", "Tutanota"),
    ("fastmail.com", "Fastmail"),
    ("hey.com", "HEY"),
    ("qq.com", "QQ Mail"),
    ("163.com", "NetEase Mail"),
    ("mail.ru", "Mail.ru"),
];

pub(crate) const ROLE_PREFIXES: &[&str] = &[
    "abuse",
    "accounting",
    "accounts",
    "admin",
    "administrator",
    "billing",
    "careers",
    "contact",
    "customerservice",
    "dev",
    "devnull",
    "enquiries",
    "feedback",
    "hello",
    "help",
    "helpdesk",
    "hostmaster",
    "hr",
    "info",
    "inquiries",
    "it",
    "jobs",
    "legal",
    "mail",
    "mailer-daemon",
    "marketing",
    "media",
    "newsletter",
    "no-reply",
    "noc",
    "noreply",
    "office",
    "postmaster",
    "press",
    "privacy",
    "root",
    "sales",
    "security",
    "service",
    "spam",
    "staff",
    "support",
    "sysadmin",
    "team",
    "tech",
    "webmaster",
];

pub(crate) const TYPO_DOMAINS: &[(&str, &str)] = &[
    ("gmial.com", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("gmaill.com", "gmail.com"),
    ("gmal.com", "gmail.com"),
    ("gmail.co", "gmail.com"),
    ("gmail.con", "gmail.com"),
    ("gmail.cm", "gmail.com"),
    ("gamil.com", "gmail.com"),
    ("gnail.com", "gmail.com"),
    ("gmaul.com", "gmail.com"),
    ("yahooo.com", "yahoo.com"),
    ("yaho.com", "yahoo.com"),
    ("yahoo.co", "yahoo.com"),
    ("yahoo.con", "yahoo.com"),
    ("yhaoo.com", "yahoo.com"),
    ("hotmial.com", "hotmail.com"),
    ("hotmai.com", "hotmail.com"),
    ("hotmal.com", "hotmail.com"),
    ("hotmail.co", "hotmail.com"),
    ("hotmail.con", "hotmail.com"),
    ("hotamil.com", "hotmail.com"),
    ("outlok.com", "outlook.com"),
    ("outloo.com", "outlook.com"),
    ("outlook.co", "outlook.com"),
    ("outlook.con", "outlook.com"),
    ("iclod.com", "icloud.com"),
    ("icloud.co", "icloud.com"),
    ("icoud.com", "icloud.com"),
    ("protonmai.com", "protonmail.com"),
    ("protonmial.com", "protonmail.com"),
    ("aol.co", "aol.com"),
    ("aoll.com", "aol.com"),
];

pub(crate) const CATCH_ALL_DOMAINS: &[&str] = &[
    "catchall.delivery",
    "fastmail.fm",
    "mailbox.org",
    "pobox.com",
    "spamgourmet.com",
];

/// Domain-based DNSBL zones, queried as `<domain>.<zone>`.
pub(crate) const BLACKLIST_HOSTS: &[&str] = &[
    "dbl.spamhaus.org",
    "multi.surbl.org",
    "black.uribl.com",
    "dbl.nordspam.com",
];
