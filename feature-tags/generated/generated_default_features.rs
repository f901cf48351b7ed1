// THIS FILE IS AUTOGENERATED.
// Any changes to this file will be overwritten.
// Generated by feature-codegen from resources/feature_registry/feature-registry.csv

/// Feature tags which are always included in the initial subset of an IFT font.
///
/// See <https://w3c.github.io/IFT/Overview.html#feature-tag-list>
pub static DEFAULT_FEATURE_TAGS: &[Tag] = &[
    Tag::new(b"abvf"),
    Tag::new(b"abvm"),
    Tag::new(b"abvs"),
    Tag::new(b"akhn"),
    Tag::new(b"blwf"),
    Tag::new(b"blwm"),
    Tag::new(b"blws"),
    Tag::new(b"calt"),
    Tag::new(b"ccmp"),
    Tag::new(b"cfar"),
    Tag::new(b"chws"),
    Tag::new(b"cjct"),
    Tag::new(b"clig"),
    Tag::new(b"curs"),
    Tag::new(b"dist"),
    Tag::new(b"dnom"),
    Tag::new(b"fin2"),
    Tag::new(b"fin3"),
    Tag::new(b"fina"),
    Tag::new(b"frac"),
    Tag::new(b"half"),
    Tag::new(b"haln"),
    Tag::new(b"init"),
    Tag::new(b"isol"),
    Tag::new(b"jalt"),
    Tag::new(b"kern"),
    Tag::new(b"liga"),
    Tag::new(b"ljmo"),
    Tag::new(b"locl"),
    Tag::new(b"ltra"),
    Tag::new(b"ltrm"),
    Tag::new(b"mark"),
    Tag::new(b"med2"),
    Tag::new(b"medi"),
    Tag::new(b"mkmk"),
    Tag::new(b"mset"),
    Tag::new(b"nukt"),
    Tag::new(b"numr"),
    Tag::new(b"pref"),
    Tag::new(b"pres"),
    Tag::new(b"pstf"),
    Tag::new(b"psts"),
    Tag::new(b"rand"),
    Tag::new(b"rclt"),
    Tag::new(b"rkrf"),
    Tag::new(b"rlig"),
    Tag::new(b"rphf"),
    Tag::new(b"rtla"),
    Tag::new(b"rtlm"),
    Tag::new(b"rvrn"),
    Tag::new(b"ssty"),
    Tag::new(b"stch"),
    Tag::new(b"tjmo"),
    Tag::new(b"valt"),
    Tag::new(b"vatu"),
    Tag::new(b"vchw"),
    Tag::new(b"vert"),
    Tag::new(b"vjmo"),
    Tag::new(b"vkrn"),
    Tag::new(b"vpal"),
    Tag::new(b"vrt2"),
    Tag::new(b"vrtr"),
];
