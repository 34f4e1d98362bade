//! Assistant copy: batch progress lines and canned fallback replies.

pub const GREETING_REPLY: &str = "مرحباً بك! 👋\n\nأنا مساعدك الذكي. يمكنني:\n\n📱 فتح أي تطبيق:\n• افتح [اسم أي تطبيق]\n• اعرض التطبيقات (لرؤية القائمة)\n\n📞 الاتصال بجهات الاتصال:\n• اتصل أحمد\n• اتصل بأحمد\n• اضرب لأحمد\n• اتصل 0501234567\n\n⚙️ التحكم الكامل:\n• شغل الواي فاي\n• سكرين شوت\n• أقفل التطبيق\n\nجرب أي أمر!";

pub const PERMISSIONS_REPLY: &str = "لإدارة الأذونات، سأفتح لك صفحة الإعدادات ⚙️\n\nهناك يمكنك:\n✓ طلب الأذونات العادية\n✓ الأذونات الخاصة\n✓ إمكانية الوصول";

pub const HELP_REPLY: &str = "📋 الأوامر المتاحة:\n\n📱 التطبيقات:\n• افتح [اسم أي تطبيق]\n• أقفل [اسم التطبيق] ⭐\n• اعرض التطبيقات\n\n📞 الاتصال:\n• اتصل [اسم أو رقم]\n• اتصل ب[اسم]\n• اضرب ل[اسم]\n• كلم [اسم]\n\n⚙️ الإعدادات:\n• شغل الواي فاي ⭐\n• شغل البلوتوث ⭐\n• رجوع / هوم ⭐\n\n🔊 الصوت:\n• على الصوت\n• خفض الصوت\n\n📸 أخرى:\n• سكرين شوت ⭐\n• اقرا الشاشة ⭐\n• اضغط على \"نص\" ⭐\n\n🔗 أوامر متعددة:\n• افتح واتساب، على الصوت، شغل الواي فاي\n• اتصل بأحمد ثم افتح يوتيوب\n\n⭐ = يحتاج Accessibility";

pub const SETTINGS_REPLY: &str = "سأفتح لك صفحة الإعدادات...";

pub const UNKNOWN_REPLY: &str = "لم أفهم 🤔\n\nجرب:\n• \"أوامر\" - لرؤية كل الأوامر\n• \"افتح واتساب\"\n• \"شغل الواي فاي\"\n• \"على الصوت\"";

pub const BATCH_COMPLETE: &str = "✅ تم تنفيذ جميع الأوامر!";

/// Posted once before the first step of a batch.
pub fn batch_summary(count: usize) -> String {
    format!("🔄 وجدت {} أوامر، سأنفذها بالترتيب...", count)
}

/// Posted before resolving a step. `index` is zero-based.
pub fn step_progress(index: usize, count: usize, command: &str) -> String {
    format!("▶️ الأمر {}/{}: \"{}\"", index + 1, count, command)
}

/// Posted when a step's command was not recognized.
pub fn step_failure(command: &str) -> String {
    format!("⚠️ لم أفهم الأمر: \"{}\"", command)
}
